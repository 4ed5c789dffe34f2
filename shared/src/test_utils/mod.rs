pub mod fixtures;
pub mod http_test_utils;
pub mod mock_sheet_store;
pub mod test_logging;
