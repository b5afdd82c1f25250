pub mod extensor_num_traits;
pub mod extensor_ops;
