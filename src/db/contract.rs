// src/db/contract.rs
//
// Favorites contract: authority, URI layout, table and column names
//
// Every other module names the table and its columns through these
// constants; nothing spells them out inline.

/// Authority under which the favorites resources are addressed
pub const AUTHORITY: &str = "com.moemke.android.popmovies";

pub const SCHEME: &str = "content";

/// Path of the favorites collection
pub const PATH_FAVORITES: &str = "favorites";

/// Database file name inside the application data directory
pub const DATABASE_NAME: &str = "favorites.db";

/// Schema version; bumping it recreates the table and drops its rows
pub const DATABASE_VERSION: i32 = 3;

/// `content://<authority>`
pub fn base_content_uri() -> String {
    format!("{}://{}", SCHEME, AUTHORITY)
}

/// The favorites table
pub mod favorites {
    use super::{base_content_uri, PATH_FAVORITES};

    pub const TABLE_NAME: &str = "favorites";

    /// Surrogate row id
    pub const ID: &str = "_id";
    pub const MOVIE_ID: &str = "movie_id";
    pub const POSTER_PATH: &str = "poster_path";
    pub const OVERVIEW: &str = "overview";
    pub const RELEASE_DATE: &str = "release_date";
    pub const ORIGINAL_TITLE: &str = "original_title";
    pub const ORIGINAL_LANGUAGE: &str = "original_language";
    pub const BACKDROP_PATH: &str = "backdrop_path";
    pub const VOTE_COUNT: &str = "vote_count";
    pub const VOTE_AVERAGE: &str = "vote_average";
    pub const GENRE_LIST: &str = "genre_list";
    pub const TIMESTAMP: &str = "timestamp";

    /// Every column, in table order
    pub const ALL_COLUMNS: [&str; 12] = [
        ID,
        MOVIE_ID,
        POSTER_PATH,
        OVERVIEW,
        RELEASE_DATE,
        ORIGINAL_TITLE,
        ORIGINAL_LANGUAGE,
        BACKDROP_PATH,
        VOTE_COUNT,
        VOTE_AVERAGE,
        GENRE_LIST,
        TIMESTAMP,
    ];

    /// `content://<authority>/favorites`
    pub fn content_uri() -> String {
        format!("{}/{}", base_content_uri(), PATH_FAVORITES)
    }

    /// `content://<authority>/favorites/<id>`
    pub fn item_uri(id: i64) -> String {
        format!("{}/{}", content_uri(), id)
    }

    pub fn is_known_column(name: &str) -> bool {
        ALL_COLUMNS.contains(&name)
    }

    pub(crate) fn create_table_sql() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                {id} INTEGER PRIMARY KEY AUTOINCREMENT,
                {movie_id} INTEGER NOT NULL,
                {poster_path} TEXT,
                {overview} TEXT,
                {release_date} TEXT,
                {original_title} TEXT NOT NULL,
                {original_language} TEXT,
                {backdrop_path} TEXT,
                {vote_count} INTEGER,
                {vote_average} FLOAT,
                {genre_list} TEXT,
                {timestamp} TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                UNIQUE ({movie_id}) ON CONFLICT REPLACE
            );",
            table = TABLE_NAME,
            id = ID,
            movie_id = MOVIE_ID,
            poster_path = POSTER_PATH,
            overview = OVERVIEW,
            release_date = RELEASE_DATE,
            original_title = ORIGINAL_TITLE,
            original_language = ORIGINAL_LANGUAGE,
            backdrop_path = BACKDROP_PATH,
            vote_count = VOTE_COUNT,
            vote_average = VOTE_AVERAGE,
            genre_list = GENRE_LIST,
            timestamp = TIMESTAMP,
        )
    }

    pub(crate) fn drop_table_sql() -> String {
        format!("DROP TABLE IF EXISTS {}", TABLE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_layout() {
        assert_eq!(base_content_uri(), "content://com.moemke.android.popmovies");
        assert_eq!(
            favorites::content_uri(),
            "content://com.moemke.android.popmovies/favorites"
        );
        assert_eq!(
            favorites::item_uri(7),
            "content://com.moemke.android.popmovies/favorites/7"
        );
    }

    #[test]
    fn test_known_columns() {
        assert!(favorites::is_known_column("movie_id"));
        assert!(favorites::is_known_column("_id"));
        assert!(!favorites::is_known_column("id"));
        assert!(!favorites::is_known_column("movie_id; DROP TABLE favorites"));
    }
}
