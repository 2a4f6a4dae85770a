pub mod i18n;
pub mod jwt;
pub mod session;
pub mod test_utils;
