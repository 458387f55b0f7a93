fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");

    // Pass through HOMEWORK_BOT_GIT_HASH from the packaging environment
    println!("cargo:rerun-if-env-changed=HOMEWORK_BOT_GIT_HASH");
    if let Ok(hash) = std::env::var("HOMEWORK_BOT_GIT_HASH") {
        println!("cargo:rustc-env=HOMEWORK_BOT_GIT_HASH={}", hash);
    }
}
