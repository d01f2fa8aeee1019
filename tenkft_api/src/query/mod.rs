mod options;
pub use self::options::ListOptions;
