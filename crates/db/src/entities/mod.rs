//! `SeaORM` entity definitions.

pub mod files;

pub mod prelude {
    //! Entity re-exports.
    pub use super::files::Entity as Files;
}
