//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fixturedb_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use fixturedb_core::{BelongsTo, Filter, FindOptions, FixtureStore, IncludeSpec, Record};
use serde_json::json;

fn main() {
    println!("fixturedb_core ping={}", fixturedb_core::ping());
    println!("fixturedb_core version={}", fixturedb_core::core_version());

    match seed_and_query() {
        Ok((posts, comments)) => {
            println!("fixturedb_core smoke posts={posts} comments={comments}");
        }
        Err(err) => {
            eprintln!("fixturedb_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}

fn seed_and_query() -> fixturedb_core::RepoResult<(usize, usize)> {
    let mut store = FixtureStore::in_memory();
    store.belongs_to("comments", vec![BelongsTo::new("posts", "post_id")]);

    let post = store.create("posts", record(json!({"title": "hello"})))?;
    store.create(
        "comments",
        record(json!({"post_id": post.id().unwrap_or(0), "body": "first"})),
    )?;

    let posts = store.find_all(
        "posts",
        &Filter::new(),
        &FindOptions::with_include(vec![IncludeSpec::name("comments")]),
    )?;
    let comments = posts
        .first()
        .and_then(|p| p.get("comments"))
        .and_then(|v| v.as_array())
        .map_or(0, Vec::len);

    Ok((posts.len(), comments))
}

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => Record::from(map),
        _ => Record::new(),
    }
}
