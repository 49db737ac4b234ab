mod object_record;

pub use object_record::ObjectRecord;
