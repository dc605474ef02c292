use std::process::{Command, Output};

const REQUIRED: [(&str, &str); 8] = [
    ("DB_HOST", "127.0.0.1"),
    ("DB_USER", "showcase"),
    ("DB_PASSWORD", "secret"),
    ("DB_NAME", "shop"),
    ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
    ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    ("AWS_REGION", "us-east-1"),
    ("S3_BUCKET_NAME", "showcase-assets"),
];

/// Run the binary with every required variable except `unset`.
fn run_without(unset: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_product-showcase"));
    cmd.env_clear()
        .env("HOST", "127.0.0.1")
        .env("PORT", "0")
        .env("RUST_LOG", "product_showcase=info");
    for (name, value) in REQUIRED.iter().filter(|(name, _)| *name != unset) {
        cmd.env(name, value);
    }
    cmd.output().unwrap()
}

#[test]
fn missing_database_variable_exits_before_binding() {
    let output = run_without("DB_NAME");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("database configuration is incomplete"), "{stderr}");
    assert!(stderr.contains("DB_NAME"), "{stderr}");
    assert!(!stdout.contains("Server listening"), "{stdout}");
}

#[test]
fn every_required_variable_is_fatal() {
    for (name, _) in REQUIRED {
        let output = run_without(name);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let group = if name.starts_with("DB_") {
            "database configuration is incomplete"
        } else {
            "object store configuration is incomplete"
        };

        assert_eq!(output.status.code(), Some(1), "unset {name}");
        assert!(stderr.contains(group), "unset {name}: {stderr}");
        assert!(!String::from_utf8_lossy(&output.stdout).contains("Server listening"));
    }
}
