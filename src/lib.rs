pub mod common {
    pub use catalog_common::*;
}

pub mod service {
    pub use catalog_service::*;
}
