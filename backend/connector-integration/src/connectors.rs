pub mod redsys;
pub use self::redsys::Redsys;
