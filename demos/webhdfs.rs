//! WebHDFS example
//!
//! A thin directory client for Hadoop's WebHDFS REST API built on
//! `RestClient`. Every operation is a query parameter (`op=...`) on a path
//! under `/webhdfs/v1`.
//!
//! Usage:
//!   cargo run --example webhdfs -- <namenode-host> [port] [user]

use rest_api_tool::{RequestOptions, ResponseBody, RestClient};
use serde_json::Value;

struct WebHdfsClient {
    api: RestClient,
    user: String,
}

impl WebHdfsClient {
    fn new(host: &str, port: u16, user: &str) -> rest_api_tool::Result<Self> {
        let api = RestClient::builder(format!("http://{host}:{port}/webhdfs/v1")).build()?;
        Ok(Self {
            api,
            user: user.to_string(),
        })
    }

    fn params(&self, operation: &str) -> RequestOptions {
        RequestOptions::new()
            .query("op", operation)
            .query("user.name", self.user.as_str())
    }

    fn list_files(&self, path: &str) -> rest_api_tool::Result<Vec<String>> {
        let listing = self.api.get(path, self.params("LISTSTATUS"))?.into_value();
        let names = listing["FileStatuses"]["FileStatus"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e["pathSuffix"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(names)
    }

    fn mkdirs(&self, path: &str) -> rest_api_tool::Result<bool> {
        let result = self.api.put(path, None, self.params("MKDIRS"))?.into_value();
        Ok(result["boolean"].as_bool().unwrap_or(false))
    }

    fn status(&self, path: &str) -> rest_api_tool::Result<Value> {
        Ok(self.api.get(path, self.params("GETFILESTATUS"))?.into_value())
    }

    fn read_file(&self, path: &str) -> rest_api_tool::Result<String> {
        let response = self.api.get(path, self.params("OPEN"))?;
        Ok(match response.body {
            ResponseBody::Text(text) => text,
            ResponseBody::Json(value) => value.to_string(),
        })
    }

    fn delete(&self, path: &str) -> rest_api_tool::Result<bool> {
        let result = self.api.delete(path, self.params("DELETE"))?.into_value();
        Ok(result["boolean"].as_bool().unwrap_or(false))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "namenode".to_string());
    let port = args.next().and_then(|p| p.parse().ok()).unwrap_or(50070);
    let user = args.next().unwrap_or_else(|| "hadoop".to_string());

    let client = WebHdfsClient::new(&host, port, &user)?;
    let home = format!("/user/{user}");

    println!("Files in {home}: {:?}", client.list_files(&home)?);

    let scratch = format!("{home}/rest-api-tool-demo");
    println!("mkdirs {scratch}: {}", client.mkdirs(&scratch)?);
    println!("status: {}", serde_json::to_string_pretty(&client.status(&scratch)?)?);

    match client.read_file(&format!("{home}/test.txt")) {
        Ok(content) => println!("test.txt: {}", content.chars().take(100).collect::<String>()),
        Err(e) => println!("Could not read test.txt: {e}"),
    }

    println!("delete {scratch}: {}", client.delete(&scratch)?);
    Ok(())
}
