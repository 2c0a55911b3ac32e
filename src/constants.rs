/// Environment variable that overrides the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

pub const DEFAULT_DB_USERNAME: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "";
pub const DEFAULT_DB_NAME: &str = "postgres";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;

// Column widths shared by the migrations and the insert validators
pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_USERNAME_LENGTH: u64 = 50;
pub const MAX_PASSWORD_HASH_LENGTH: u64 = 128;
pub const MAX_TABLE_NAME_LENGTH: u64 = 50;

pub const MIN_START_YEAR: i32 = 1900;
/// How far past the current year a study may start.
pub const START_YEAR_LOOKAHEAD: i32 = 10;
