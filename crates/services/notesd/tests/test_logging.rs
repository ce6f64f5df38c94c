use std::error::Error;

#[test]
fn test_env_file_sets_log_filter() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("notesd-{}.env", std::process::id()));
    std::fs::write(&path, "RUST_LOG=notesd=trace\n")?;
    let loaded = dotenvy::from_path_override(&path);
    std::fs::remove_file(&path)?;
    loaded?;

    assert_eq!(notesd::logging::env_filter().to_string(), "notesd=trace");
    Ok(())
}
