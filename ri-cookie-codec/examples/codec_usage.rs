//! Example demonstrating parsing a `Cookie` header and serializing `Set-Cookie` values.

use ri_cookie_codec::{CookieRecord, parse, serialize};
use time::{Duration, OffsetDateTime};

fn main() {
    // Example 1: Parsing a Cookie header
    println!("=== Example 1: Parsing ===");
    let cookie_header = "session=abc%20123; theme=dark; theme=light; stray; lang=%1";
    let cookies = parse([cookie_header]);

    println!("Parsed {} cookies:", cookies.len());
    for cookie in &cookies {
        println!("  {} = {}", cookie.name, cookie.value);
    }

    // Example 2: Serializing a record
    println!("\n=== Example 2: Serializing ===");
    let cookie = CookieRecord::new("session", "abc 123")
        .with_domain("example.com")
        .with_path("/")
        .with_max_age(3600.0)
        .with_expires(OffsetDateTime::now_utc() + Duration::hours(1))
        .with_secure(true)
        .with_same_site("lax")
        .with_http_only(true);

    match serialize([&cookie]) {
        Ok(set_cookie) => println!("  Set-Cookie: {set_cookie}"),
        Err(err) => println!("  error: {err}"),
    }

    // Example 3: Validation happens on serialization
    println!("\n=== Example 3: Invalid Attributes ===");
    let invalid = CookieRecord::new("session", "abc").with_same_site("sometimes");
    match invalid.to_set_cookie_string() {
        Ok(set_cookie) => println!("  Set-Cookie: {set_cookie}"),
        Err(err) => println!("  rejected {}: {err}", err.attribute()),
    }

    // Example 4: Expiry
    println!("\n=== Example 4: Expiry ===");
    let stale = CookieRecord::new("old", "1").with_expires(OffsetDateTime::now_utc() - Duration::days(1));
    println!("  expired: {:?}", stale.is_expired());
}
