pub struct StoreConfig {
    pub url: String,
    pub pool_size: usize,
}

impl StoreConfig {
    pub fn from_cli_or_env(cli_arg: Option<String>) -> Self {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("DATABASE_URL") {
            env
        } else {
            "matches.db".to_string()
        };

        Self { url, pool_size: 20 }
    }

    pub async fn create_pool(&self) -> Result<sqlx::SqlitePool, sqlx::Error> {
        sqlx::SqlitePool::connect_with(
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(&self.url)
                .create_if_missing(true),
        )
        .await
    }
}
