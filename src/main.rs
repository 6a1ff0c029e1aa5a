use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weburl::{parse_url, Url};

fn print_url(input: &str, url: &Url) {
    println!("  {}", input);
    println!("    scheme:    {}", url.scheme);
    if let Some(user) = &url.user {
        println!("    user:      {}", user);
    }
    if url.pass.is_some() {
        println!("    pass:      ****");
    }
    println!("    subdomain: {}", url.subdomain);
    println!("    host:      {}", url.host);
    println!("    tld:       {}", url.tld);
    println!("    port:      {}", url.port());
    println!("    path:      {}", url.path);
    for (key, value) in url.query_params.iter() {
        println!("    param:     {} = {}", key, value);
    }
    if url.has_fragment() {
        println!("    fragment:  {}", url.fragment);
    }
    match url.to_string_checked(false) {
        Ok(ascii) => println!("    ascii:     {}", ascii),
        Err(e) => println!("    ascii:     ✗ {}", e),
    }
    println!("    display:   {}", url.to_human_readable_string());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<String> = if args.is_empty() {
        info!("no arguments given, showing built-in samples");
        vec![
            "example.org".to_string(),
            "https://user:pw@a.b.example.co.uk:8443/p%20q?x=1&x=2#top".to_string(),
            "http://☃.com/".to_string(),
            "https://[::1]:2771/foo".to_string(),
        ]
    } else {
        args
    };

    let mut failures = 0;
    for input in &inputs {
        match parse_url(input) {
            Ok(url) => print_url(input, &url),
            Err(e) => {
                failures += 1;
                error!(input = %input, error = %e, "failed to parse");
                println!("  {}\n    ✗ {}", input, e);
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}
