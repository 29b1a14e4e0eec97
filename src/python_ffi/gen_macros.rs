/// Wraps a value that a Python method may take away, e.g. a graph that is
/// moved into the network built from it.
#[macro_export]
macro_rules! MakeConsumable {
    ($name:ident,$inner_type:tt,$obj_name:ident) => {
        pub(super) struct $name {
            obj: Option<$inner_type>,
        }
        impl $name {
            pub(super) fn acquire(val: $inner_type) -> Self {
                Self { obj: Some(val) }
            }
            fn get_ref(self: &Self) -> PyResult<&$inner_type> {
                self.obj.as_ref().ok_or_else(|| {
                    pyo3::exceptions::PyRuntimeError::new_err(std::stringify!(
                        This $obj_name object is consumed and cannot be used
                    ))
                })
            }
            fn get_ref_mut(self: &mut Self) -> PyResult<&mut $inner_type> {
                self.obj.as_mut().ok_or_else(|| {
                    pyo3::exceptions::PyRuntimeError::new_err(std::stringify!(
                        This $obj_name object is consumed and cannot be used
                    ))
                })
            }
            fn release(&mut self) -> PyResult<$inner_type> {
                self.obj.take().ok_or_else(|| {
                    pyo3::exceptions::PyRuntimeError::new_err(std::stringify!(
                        This $obj_name object is consumed and cannot be used
                    ))
                })
            }
        }
    };
}

#[macro_export]
macro_rules! Impl_to_PyErr {
    (for $($t:ty),+) => {
        $(impl From<$t> for PyErr {
            fn from(err: $t) -> Self {
                pyo3::exceptions::PyValueError::new_err(format!("{}", err))
            }
        }
        )*
    }
}
