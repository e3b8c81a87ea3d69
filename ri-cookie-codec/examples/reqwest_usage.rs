//! Example demonstrating storing serialized cookies in a reqwest cookie jar.
//!
//! Run with: cargo run --example reqwest_usage --features reqwest

#[cfg(feature = "reqwest")]
fn main() {
    use reqwest::cookie::{CookieStore, Jar};
    use ri_cookie_codec::parse;
    use ri_cookie_codec::reqwest_support::add_to_jar;

    println!("=== Cookie Jar for Reqwest ===");
    let jar = Jar::default();
    let url: reqwest::Url = match "https://example.com".parse() {
        Ok(url) => url,
        Err(err) => {
            println!("invalid url: {err}");
            return;
        }
    };

    let cookies = parse(["session=abc%3Bxyz; user=john; token=abc123"]);
    for cookie in &cookies {
        match add_to_jar(&jar, &url, cookie) {
            Ok(()) => println!("  stored {} = {}", cookie.name, cookie.value),
            Err(err) => println!("  skipped {}: {err}", cookie.name),
        }
    }

    if let Some(header) = jar.cookies(&url) {
        println!("\nCookie header sent to {url}: {header:?}");
    }
}

#[cfg(not(feature = "reqwest"))]
fn main() {
    println!("Please run with --features reqwest");
    println!("Example: cargo run --example reqwest_usage --features reqwest");
}
