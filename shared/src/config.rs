use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub mail: MailConfig,
    pub locale: String,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let mail = MailConfig {
            // Gmail API のエンドポイント。テスト時に差し替えられるよう環境変数からも設定できる
            endpoint: std::env::var("GMAIL_SEND_ENDPOINT").unwrap_or_else(|_| {
                "https://gmail.googleapis.com/gmail/v1/users/me/messages/send".into()
            }),
            access_token: std::env::var("GMAIL_ACCESS_TOKEN").unwrap_or_default(),
        };
        let locale = std::env::var("APP_LOCALE").unwrap_or_else(|_| "ja".into());
        Ok(Self {
            database,
            redis,
            mail,
            locale,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub access_token: String,
}
