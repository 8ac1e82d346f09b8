use std::fmt;

use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectType {
    File,
    #[default]
    Unknown,
}

/// Storage class of an object, `Unspecified` when the service did not report a known one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageClass {
    #[default]
    Unspecified,
    Standard,
    StandardIa,
}

/// Generic object metadata produced by a storager.
#[derive(Clone, Debug, Default)]
pub struct Object {
    pub id: String,
    pub name: String,
    pub ty: ObjectType,

    done: bool,
    storager: String,

    size: Option<i64>,
    updated_at: Option<OffsetDateTime>,
    content_type: Option<String>,
    etag: Option<String>,
    storage_class: StorageClass,
}

impl Object {
    pub fn new(storager: &dyn fmt::Display, done: bool) -> Self {
        Self {
            done,
            storager: storager.to_string(),
            ..Default::default()
        }
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn storager(&self) -> &str {
        &self.storager
    }

    pub fn set_size(&mut self, size: i64) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn size(&self) -> Option<i64> {
        self.size
    }

    pub fn set_updated_at(&mut self, t: OffsetDateTime) -> &mut Self {
        self.updated_at = Some(t);
        self
    }

    /// `None` is the zero time: the service did not report a modification time.
    pub fn updated_at(&self) -> Option<OffsetDateTime> {
        self.updated_at
    }

    pub fn set_content_type(&mut self, v: &str) -> &mut Self {
        self.content_type = Some(v.to_string());
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_etag(&mut self, v: &str) -> &mut Self {
        self.etag = Some(v.to_string());
        self
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn set_storage_class(&mut self, v: StorageClass) -> &mut Self {
        self.storage_class = v;
        self
    }

    pub fn storage_class(&self) -> StorageClass {
        self.storage_class
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageMeta {
    pub name: String,
    pub location: String,
    pub work_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object() {
        let o = Object::new(&"Storager test", true);

        assert!(o.done());
        assert_eq!(o.storager(), "Storager test");
        assert_eq!(o.ty, ObjectType::Unknown);
        assert_eq!(o.size(), None);
        assert_eq!(o.updated_at(), None);
        assert_eq!(o.storage_class(), StorageClass::Unspecified);
    }

    #[test]
    fn test_setters() {
        let mut o = Object::new(&"Storager test", false);
        o.set_size(10).set_content_type("text/plain").set_etag("\"abc\"");

        assert_eq!(o.size(), Some(10));
        assert_eq!(o.content_type(), Some("text/plain"));
        assert_eq!(o.etag(), Some("\"abc\""));
    }
}
