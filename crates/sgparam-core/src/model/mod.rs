mod datatype;

pub use datatype::DataType;
