#![allow(missing_docs)]
#![allow(dead_code)]

pub const DOCUMENT: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "size": 5000000000,
        "ratio": 0.5,
        "options": {
            "opt_level": 2,
            "features": ["serde", "tokio"]
        }
    },
    "snippets": ["fn main() {}", "println!(\"hi\")"],
    "matrix": [[1, -1], [], [[true, false]]],
    "escapes": "tab\there é😀"
}"#;
