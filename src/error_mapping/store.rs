use skycast_core::{AppError, StorageError};
use skycast_store::StoreError;

pub fn map_store_error(e: StoreError) -> AppError {
    match e {
        StoreError::Unavailable(s) => AppError::Storage(StorageError::Unavailable(s)),
        StoreError::Database(e) => AppError::Storage(StorageError::WriteFailed(e.to_string())),
        StoreError::Encode { key, source } => {
            AppError::Storage(StorageError::Corruption(format!("{}: {}", key, source)))
        }
        StoreError::Other(e) => AppError::Storage(StorageError::WriteFailed(e.to_string())),
    }
}
