//! Exercises the favorites store end to end through the public provider API.

use std::sync::{Arc, Mutex};

use popmovies::contract::favorites as columns;
use popmovies::{
    AppError, ChangeKind, ContentValues, EventBus, Favorite, FavoritesChanged, FavoritesDatabase,
    FavoritesProvider, FavoritesRoute, MovieSummary, SqliteFavoritesProvider,
};
use rusqlite::types::Value;
use tempfile::TempDir;

struct Store {
    _dir: TempDir,
    database: FavoritesDatabase,
    bus: Arc<EventBus>,
    provider: SqliteFavoritesProvider,
}

fn open_store() -> Store {
    let dir = TempDir::new().expect("temp dir");
    let database = FavoritesDatabase::open(&dir.path().join("favorites.db")).expect("open store");
    let bus = Arc::new(EventBus::new());
    let provider = SqliteFavoritesProvider::new(database.pool(), Arc::clone(&bus));
    Store {
        _dir: dir,
        database,
        bus,
        provider,
    }
}

fn favorite(movie_id: i64, title: &str) -> ContentValues {
    let mut movie = MovieSummary::new(movie_id, title);
    movie.overview = format!("Overview of {}", title);
    movie.release_date = "2016-06-18".to_string();
    movie.original_language = "en".to_string();
    movie.poster_path = Some(format!("/poster{}.jpg", movie_id));
    movie.vote_count = 1960;
    movie.vote_average = 5.8;
    Favorite::new(movie, "Animation | Comedy").to_content_values()
}

fn row_count(provider: &SqliteFavoritesProvider) -> usize {
    provider
        .query(&FavoritesRoute::Collection, None, None, &[], None)
        .expect("query collection")
        .count()
}

fn by_movie_id(movie_id: i64) -> (Option<&'static str>, Vec<Value>) {
    (Some("movie_id = ?"), vec![Value::Integer(movie_id)])
}

#[test]
fn insert_then_delete_restores_row_count() {
    let store = open_store();
    store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(1, "Existing"))
        .unwrap();
    let before = row_count(&store.provider);

    for (id, title) in [(12345, "The Secret Life of Pets"), (23456, "La La Land")] {
        store
            .provider
            .insert(&FavoritesRoute::Collection, &favorite(id, title))
            .unwrap();
        let (selection, args) = by_movie_id(id);
        assert_eq!(
            store
                .provider
                .delete(&FavoritesRoute::Collection, selection, &args)
                .unwrap(),
            1
        );
        assert_eq!(row_count(&store.provider), before);
    }
}

#[test]
fn bulk_insert_reports_count_and_round_trips_fields() {
    let store = open_store();
    let batch: Vec<ContentValues> = (1..=5)
        .map(|i| favorite(1000 + i, &format!("Movie {}", i)))
        .collect();

    let inserted = store
        .provider
        .bulk_insert(&FavoritesRoute::Collection, &batch)
        .unwrap();
    assert_eq!(inserted, batch.len());

    let cursor = store
        .provider
        .query(
            &FavoritesRoute::Collection,
            None,
            None,
            &[],
            Some("movie_id ASC"),
        )
        .unwrap();
    assert_eq!(cursor.count(), batch.len());

    for (row, values) in batch.iter().enumerate() {
        for (column, value) in values.iter() {
            assert_eq!(cursor.get(row, column), Some(value), "column {}", column);
        }
        assert!(cursor.get(row, columns::TIMESTAMP).is_some());
    }
}

#[test]
fn update_reports_matches_and_leaves_others() {
    let store = open_store();
    store
        .provider
        .bulk_insert(
            &FavoritesRoute::Collection,
            &[favorite(1, "A"), favorite(2, "B"), favorite(3, "C"), favorite(4, "D")],
        )
        .unwrap();

    let updated = store
        .provider
        .update(
            &FavoritesRoute::Collection,
            &ContentValues::new().with(columns::VOTE_AVERAGE, 9.9),
            Some("movie_id IN (?, ?, ?)"),
            &[Value::Integer(1), Value::Integer(3), Value::Integer(99)],
        )
        .unwrap();
    assert_eq!(updated, 2);

    let favorites = store
        .provider
        .query(&FavoritesRoute::Collection, None, None, &[], Some("movie_id"))
        .unwrap()
        .to_favorites()
        .unwrap();
    let averages: Vec<f64> = favorites.iter().map(|f| f.movie.vote_average).collect();
    assert_eq!(averages, vec![9.9, 5.8, 9.9, 5.8]);
}

#[test]
fn missing_item_is_an_empty_result() {
    let store = open_store();
    let cursor = store
        .provider
        .query(&FavoritesRoute::Item(987654), None, None, &[], None)
        .unwrap();

    assert_eq!(cursor.count(), 0);
}

#[test]
fn secret_life_of_pets_scenario() {
    let store = open_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.bus.subscribe::<FavoritesChanged, _>(move |event| {
        sink.lock().unwrap().push(event.kind);
    });

    store
        .provider
        .insert(
            &FavoritesRoute::Collection,
            &favorite(12345, "The Secret Life of Pets"),
        )
        .unwrap();
    let cursor = store
        .provider
        .query(&FavoritesRoute::Collection, None, None, &[], None)
        .unwrap();
    assert_eq!(cursor.count(), 1);
    assert_eq!(cursor.get_i64(0, columns::MOVIE_ID), Some(12345));
    assert_eq!(
        cursor.get_string(0, columns::ORIGINAL_TITLE).as_deref(),
        Some("The Secret Life of Pets")
    );

    store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(12345, "Updated Title"))
        .unwrap();
    assert!(cursor.is_stale());
    let cursor = store
        .provider
        .query(&FavoritesRoute::Collection, None, None, &[], None)
        .unwrap();
    assert_eq!(cursor.count(), 1);
    assert_eq!(
        cursor.get_string(0, columns::ORIGINAL_TITLE).as_deref(),
        Some("Updated Title")
    );

    let (selection, args) = by_movie_id(12345);
    store
        .provider
        .delete(&FavoritesRoute::Collection, selection, &args)
        .unwrap();
    assert_eq!(row_count(&store.provider), 0);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ChangeKind::Insert, ChangeKind::Insert, ChangeKind::Delete]
    );
}

#[test]
fn writes_that_match_nothing_stay_silent() {
    let store = open_store();
    store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(1, "Kept"))
        .unwrap();
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    store.bus.subscribe::<FavoritesChanged, _>(move |_| {
        *sink.lock().unwrap() += 1;
    });

    let (selection, args) = by_movie_id(12345);
    assert_eq!(
        store
            .provider
            .delete(&FavoritesRoute::Collection, selection, &args)
            .unwrap(),
        0
    );
    assert_eq!(
        store
            .provider
            .delete(&FavoritesRoute::Item(987654), None, &[])
            .unwrap(),
        0
    );

    assert_eq!(*seen.lock().unwrap(), 0);
    assert_eq!(row_count(&store.provider), 1);
}

#[test]
fn item_route_targets_its_row_whatever_the_selection() {
    let store = open_store();
    let uri = store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(12345, "The Secret Life of Pets"))
        .unwrap();
    store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(23456, "La La Land"))
        .unwrap();
    let item = FavoritesRoute::parse(&uri).unwrap();
    let (selection, args) = by_movie_id(23456);

    let updated = store
        .provider
        .update(
            &item,
            &ContentValues::new().with(columns::VOTE_AVERAGE, 9.9),
            selection,
            &args,
        )
        .unwrap();
    assert_eq!(updated, 1);

    let favorites = store
        .provider
        .query(&FavoritesRoute::Collection, None, None, &[], Some("movie_id"))
        .unwrap()
        .to_favorites()
        .unwrap();
    assert_eq!(favorites[0].movie.vote_average, 9.9);
    assert_eq!(favorites[1].movie.vote_average, 5.8);

    assert_eq!(store.provider.delete(&item, selection, &args).unwrap(), 1);
    let left = store
        .provider
        .query(&FavoritesRoute::Collection, None, None, &[], None)
        .unwrap();
    assert_eq!(left.count(), 1);
    assert_eq!(left.get_i64(0, columns::MOVIE_ID), Some(23456));
}

#[test]
fn unknown_uri_aborts_every_verb() {
    for uri in [
        "content://com.moemke.android.popmovies/movies",
        "content://com.moemke.android.popmovies/favorites/abc",
        "content://some.other.authority/favorites",
        "content://com.moemke.android.popmovies/favorites/1/extra",
    ] {
        assert!(
            matches!(FavoritesRoute::parse(uri), Err(AppError::UnknownUri(_))),
            "{}",
            uri
        );
    }
}

#[test]
fn store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.db");

    {
        let database = FavoritesDatabase::open(&path).unwrap();
        let provider =
            SqliteFavoritesProvider::new(database.pool(), Arc::new(EventBus::new()));
        provider
            .insert(&FavoritesRoute::Collection, &favorite(7, "Kept"))
            .unwrap();
        database.close();
    }

    let database = FavoritesDatabase::open(&path).unwrap();
    assert_eq!(database.stats().unwrap().favorite_count, 1);
}

#[test]
fn older_schema_is_recreated_and_newer_is_refused() {
    let store = open_store();
    store
        .provider
        .insert(&FavoritesRoute::Collection, &favorite(7, "Lost on upgrade"))
        .unwrap();
    let path = store.database.path().unwrap().to_path_buf();
    let Store {
        _dir: dir,
        database,
        provider,
        ..
    } = store;
    drop(provider);
    database.close();
    assert!(dir.path().exists());

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", 2).unwrap();
    }
    let database = FavoritesDatabase::open(&path).unwrap();
    assert_eq!(database.stats().unwrap().favorite_count, 0);
    assert_eq!(
        database.stats().unwrap().schema_version,
        popmovies::contract::DATABASE_VERSION
    );
    database.close();

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", 99).unwrap();
    }
    assert!(FavoritesDatabase::open(&path).is_err());
}
