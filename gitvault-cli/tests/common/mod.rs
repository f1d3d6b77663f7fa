//! Shared fixtures for CLI integration tests: a minimal listing API stub and
//! a fake `git` executable.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

/// Bind an ephemeral listener and return it with its base URL.
pub fn bind_stub() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    (listener, base)
}

/// Serve one canned JSON listing response per connection, in order.
pub fn serve_listing(listener: TcpListener, bodies: Vec<String>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for body in bodies {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("request line");
                if line.trim_end().is_empty() {
                    break;
                }
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len(),
            );
            stream.write_all(head.as_bytes()).expect("write head");
            stream.write_all(body.as_bytes()).expect("write body");
        }
    })
}

/// A single-page listing body for `(id, name)` pairs.
pub fn listing_body(repos: &[(u64, &str)]) -> String {
    let entries: Vec<serde_json::Value> = repos
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "full_name": format!("octocat/{name}"),
                "private": false,
                "owner": { "login": "octocat" },
                "html_url": format!("https://github.com/octocat/{name}"),
                "clone_url": format!("https://github.com/octocat/{name}.git"),
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z",
                "pushed_at": null,
                "description": null
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// Install a fake `git` into `bin_dir` that creates mirror directories on
/// clone and succeeds silently on pull/fetch.
#[cfg(unix)]
pub fn install_fake_git(bin_dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let script = "#!/bin/sh\n\
case \"$1\" in\n\
  clone)\n\
    mkdir -p \"$3\"\n\
    printf 'mirror of %s\\n' \"$2\" > \"$3/README.md\"\n\
    ;;\n\
  pull|fetch)\n\
    ;;\n\
  *)\n\
    exit 1\n\
    ;;\n\
esac\n\
exit 0\n";

    std::fs::create_dir_all(bin_dir).expect("create bin dir");
    let git = bin_dir.join("git");
    std::fs::write(&git, script).expect("write fake git");
    std::fs::set_permissions(&git, std::fs::Permissions::from_mode(0o755))
        .expect("mark fake git executable");
}
