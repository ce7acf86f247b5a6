use thiserror::Error;

/// 저장소(DB) 에러
/// Persistence failures from the remote data store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    /// 저장된 값이 도메인 enum으로 해석되지 않음
    /// A stored value could not be mapped back to the domain model
    #[error("Corrupt row in {table}: {detail}")]
    CorruptRow { table: &'static str, detail: String },
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        // 레포지토리가 StoreError를 그대로 올린 경우 원래 variant 유지
        match err.downcast::<StoreError>() {
            Ok(store_err) => store_err,
            // {:#} 는 context 체인 전체를 한 줄로 출력
            Err(err) => StoreError::Database(format!("{:#}", err)),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
