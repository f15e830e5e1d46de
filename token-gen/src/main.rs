use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use jsonwebtoken::{EncodingKey, Header};
use uuid::Uuid;

/// Mint an HS256 bearer token accepted by the demo API.
///
/// This tool is intentionally minimal and self-contained:
/// - Builds the claim set ({id, created_at, exp})
/// - Signs it with the shared secret (HS256)
/// - Outputs the token plus the claim values it chose
///
/// The secret comes from --secret or the TOKEN_SECRET environment variable,
/// matching what the server reads at startup.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject user id. Default: random UUID v4.
    #[arg(long)]
    user_id: Option<Uuid>,

    /// Token lifetime in seconds. Negative values mint an already-expired
    /// token (useful for exercising the 401 path).
    #[arg(long, default_value_t = 600, allow_negative_numbers = true)]
    ttl: i64,

    /// Signing secret. Default: the TOKEN_SECRET environment variable.
    #[arg(long)]
    secret: Option<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_secs() as i64
}

fn expiry(created_at: i64, ttl: i64) -> i64 {
    // saturate rather than overflow for absurd lifetimes
    created_at.saturating_add(ttl)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let secret = match args.secret.or_else(|| std::env::var("TOKEN_SECRET").ok()) {
        Some(s) if !s.is_empty() => s,
        _ => return Err("no signing secret: pass --secret or set TOKEN_SECRET".into()),
    };

    let user_id = args.user_id.unwrap_or_else(Uuid::new_v4);
    let created_at = now_unix();
    let exp = expiry(created_at, args.ttl);

    let claims = serde_json::json!({
        "id": user_id.to_string(),
        "created_at": created_at,
        "exp": exp,
    });

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("user_id: {}", user_id);
    println!("created_at: {}", created_at);
    println!("exp: {} (ttl: {}s)", exp, args.ttl);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_accepts_a_negative_value() {
        let space = Args::try_parse_from(["token-gen", "--ttl", "-600"]).unwrap();
        let equals = Args::try_parse_from(["token-gen", "--ttl=-600"]).unwrap();

        assert_eq!(space.ttl, -600);
        assert_eq!(equals.ttl, -600);
    }

    #[test]
    fn expiry_saturates_for_absurd_lifetimes() {
        assert_eq!(expiry(1, i64::MAX), i64::MAX);
        assert_eq!(expiry(i64::MIN, -1), i64::MIN);
    }
}
