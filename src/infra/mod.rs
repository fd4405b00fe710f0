pub mod leen;
#[cfg(test)]
pub mod mock_backend;
