//! Basic usage example
//!
//! Walks through the common calls against the public JSONPlaceholder API:
//! GET, POST, custom headers, credential rotation, error handling and a
//! file upload.
//!
//! Usage:
//!   cargo run --example basic_usage
//!
//! Debug details (headers, truncated bodies) are written to `logs/api_usage.log`.

use rest_api_tool::{ErrorKind, HeaderSet, RequestOptions, RestClient, DEFAULT_FILE_FIELD};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut api = RestClient::builder("https://jsonplaceholder.typicode.com")
        .token("your_access_token_here")
        .log_file("logs/api_usage.log")
        .build()?;

    println!("\n=== Example 1: GET ===");
    match api.get("/users", RequestOptions::new()) {
        Ok(users) => {
            let list = users.json().and_then(|v| v.as_array()).cloned().unwrap_or_default();
            println!("Fetched {} users", list.len());
            if let Some(first) = list.first() {
                println!("First user: {}", first["name"]);
            }
        }
        Err(e) => println!("Failed to fetch users: {e}"),
    }

    println!("\n=== Example 2: POST ===");
    let new_post = json!({
        "title": "New post",
        "body": "Post content",
        "userId": 1
    });
    match api.post("/posts", Some(new_post), RequestOptions::new()) {
        Ok(created) => println!("Created post with id {}", created.json().map(|v| v["id"].clone()).unwrap_or_default()),
        Err(e) => println!("Failed to create post: {e}"),
    }

    println!("\n=== Example 3: Custom headers ===");
    let headers = HeaderSet::new()
        .with("X-Custom-Header", "MyValue")
        .with("Accept", "application/json");
    match api.get("/posts/1", RequestOptions::new().headers(&headers)) {
        Ok(post) => println!("Post title: {}", post.json().map(|v| v["title"].clone()).unwrap_or_default()),
        Err(e) => println!("Request failed: {e}"),
    }

    println!("\n=== Example 4: Query parameters and PATCH ===");
    match api.get("/comments", RequestOptions::new().query("postId", "1")) {
        Ok(comments) => println!(
            "Comments on post 1: {}",
            comments.json().and_then(|v| v.as_array()).map(|a| a.len()).unwrap_or(0)
        ),
        Err(e) => println!("Request failed: {e}"),
    }
    if let Err(e) = api.patch("/posts/1", Some(json!({"title": "Patched"})), RequestOptions::new()) {
        println!("Patch failed: {e}");
    }

    println!("\n=== Example 5: Rotating the token ===");
    api.set_credential("rotated_token");
    if let Err(e) = api.delete("/posts/1", RequestOptions::new()) {
        println!("Delete failed: {e}");
    }

    println!("\n=== Example 6: Error handling ===");
    match api.get("/does-not-exist", RequestOptions::new()) {
        Ok(_) => println!("Unexpected success"),
        Err(e) if e.kind() == ErrorKind::Status => println!("Status error as expected: {e}"),
        Err(e) => println!("Other error: {e}"),
    }

    println!("\n=== Example 7: File upload ===");
    let path = std::env::temp_dir().join("rest_api_tool_demo.txt");
    std::fs::write(&path, "demo upload")?;
    match api.upload_file(
        "/posts",
        &path,
        DEFAULT_FILE_FIELD,
        Some(vec![("description".to_string(), "demo".to_string())]),
        None,
    ) {
        Ok(resp) => println!("Upload answered with status {}", resp.status),
        Err(e) => println!("Upload failed: {e}"),
    }
    let _ = std::fs::remove_file(&path);

    Ok(())
}
