use anyhow::{bail, Context};
use maplet_geosearch::prelude::*;

const USAGE: &str = "usage: geosearch-app [--provider openstreetmap|esri|google|bing|coordinates] \
[--key API_KEY] [--zoom N] [--no-marker] [--timeout SECS] <query...>";

struct Args {
    provider: String,
    api_key: Option<String>,
    zoom: Option<u32>,
    show_marker: bool,
    timeout: Duration,
    query: String,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        provider: "openstreetmap".to_string(),
        api_key: None,
        zoom: None,
        show_marker: true,
        timeout: Duration::from_secs(30),
        query: String::new(),
    };
    let mut words = Vec::new();
    let mut it = std::env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--provider" => args.provider = it.next().context("--provider needs a value")?,
            "--key" => args.api_key = Some(it.next().context("--key needs a value")?),
            "--zoom" => {
                let zoom = it.next().context("--zoom needs a value")?;
                args.zoom = Some(zoom.parse().with_context(|| format!("bad zoom {:?}", zoom))?);
            }
            "--timeout" => {
                let secs = it.next().context("--timeout needs a value")?;
                args.timeout = Duration::from_secs(
                    secs.parse().with_context(|| format!("bad timeout {:?}", secs))?,
                );
            }
            "--no-marker" => args.show_marker = false,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {}\n{}", flag, USAGE),
            word => words.push(word.to_string()),
        }
    }

    args.query = words.join(" ");
    if args.query.trim().is_empty() {
        bail!("missing query\n{}", USAGE);
    }
    Ok(args)
}

fn provider_config(args: &Args) -> anyhow::Result<ProviderConfig> {
    let config = match args.provider.as_str() {
        "openstreetmap" | "osm" => ProviderConfig::OpenStreetMap { base_url: None },
        "esri" => ProviderConfig::Esri { base_url: None },
        "google" => ProviderConfig::Google {
            api_key: args.api_key.clone(),
        },
        "bing" => ProviderConfig::Bing {
            api_key: args.api_key.clone(),
        },
        "coordinates" => ProviderConfig::Coordinates,
        other => bail!("unknown provider {:?}\n{}", other, USAGE),
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    maplet_geosearch::init_logging();
    let args = parse_args()?;

    let mut config = GeoSearchConfig::new(provider_config(&args)?.build()?)
        .show_marker(args.show_marker);
    if let Some(zoom) = args.zoom {
        config = config.zoom_level(zoom);
    }

    let mut map = HeadlessMap::new(LatLng::default(), 2.0);
    let mut control = SearchControl::new(config);
    control.on_add(&mut map)?;

    for event in [
        InputEvent::ToggleClick,
        InputEvent::text(args.query.as_str()),
        InputEvent::key_press(KeyCode::Enter),
    ] {
        control.handle_input(&event)?;
    }
    log::info!(
        "searching {:?} with {}",
        args.query,
        control.config().provider.name()
    );

    // wait_for_results blocks, keep it off the async workers
    let (control, map) = tokio::task::spawn_blocking(move || {
        control.wait_for_results(&mut map, args.timeout);
        (control, map)
    })
    .await?;

    println!("{}", TextRenderer.render(&control.view()));
    if control.in_flight() > 0 {
        bail!("search timed out");
    }
    if let Some(message) = control.error_message() {
        bail!("{}", message);
    }

    println!("center: {} zoom: {}", map.center(), map.zoom());
    for (id, position) in map.markers() {
        println!("marker {}: {}", id.0, position);
    }
    Ok(())
}
