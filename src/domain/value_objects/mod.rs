mod bucket_name;
mod object_path;
mod prefix;

pub use bucket_name::BucketName;
pub use object_path::ObjectPath;
pub use prefix::Prefix;
