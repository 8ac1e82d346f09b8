//! QingStor object storage exposed through the generic `Servicer` / `Storager` seam.
//!
//! ```no_run
//! # async fn run() -> Result<(), qingstor::model::error::InitError> {
//! use qingstor::model::pairs::{Credential, Pair};
//!
//! let store = qingstor::new_storager(&[
//!     Pair::Credential(Credential::hmac("access_key", "secret_key")),
//!     Pair::Name("mybucket".to_string()),
//!     Pair::WorkDir("/data/".to_string()),
//! ])
//! .await?;
//! println!("{}", store);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod model;
pub mod util;

pub use adapters::{
    qingstor::{
        new, new_servicer, new_storager, Service, Storage, STORAGE_CLASS_STANDARD,
        STORAGE_CLASS_STANDARD_IA, TYPE,
    },
    Servicer, Storager,
};
pub use model::object::StorageClass;
pub use util::object::is_bucket_name_valid;
