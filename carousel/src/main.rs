//! Carousel demo binary
//!
//! Drives a looping, autoplaying carousel headlessly and prints what a
//! renderer would draw. Options start from the `CAROUSEL_*` environment
//! variables, with autoplay and loop mode switched on.

use anyhow::Result;
use marquee_carousel::{
    CarouselAction, CarouselConfig, CarouselEnvironment, CarouselReducer, CarouselState, ItemId,
    ItemNavigator, StaticSource,
};
use marquee_core::environment::SystemClock;
use marquee_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EVENTS: &str = r#"[
    {"id": "midnight-jazz", "image": "/images/events/jazz.jpg", "title": "Midnight Jazz", "subtitle": "Blue Room, Fri 21:00"},
    {"id": "city-marathon", "image": "/images/events/marathon.jpg", "title": "City Marathon", "subtitle": "Sun 07:30"},
    {"id": "opera-gala", "image": "", "title": "Opera Gala", "subtitle": "Grand Theatre"},
    {"id": "food-fest", "image": "/images/events/food.jpg", "title": "Street Food Festival"}
]"#;

/// Logs navigation instead of routing
struct LogNavigator;

impl ItemNavigator for LogNavigator {
    fn open(&self, id: &ItemId) {
        tracing::info!(item = %id, "Navigate to event detail");
    }
}

type CarouselStore = Store<CarouselState, CarouselAction, CarouselEnvironment, CarouselReducer>;

async fn print_frame(store: &CarouselStore, label: &str) {
    store.send(CarouselAction::Frame).await.ok();
    let (index, position, dots, slides) = store
        .state(|s| {
            let pagination = s.pagination();
            let dots: String = pagination
                .dots()
                .map(|(_, active)| if active { '●' } else { '○' })
                .collect();
            let slides: Vec<String> = s
                .slides()
                .iter()
                .map(|slide| {
                    format!(
                        "{}{} x={:.0} rot={:.0}°",
                        slide.item.title,
                        if slide.is_ghost { " (ghost)" } else { "" },
                        slide.x,
                        slide.rotate_y
                    )
                })
                .collect();
            (s.current_index(), s.position(), dots, slides)
        })
        .await;

    println!("\n[{label}] index={index} position={position:.1} {dots}");
    for slide in slides {
        println!("    {slide}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "carousel=debug,marquee_carousel=debug,marquee_runtime=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CarouselConfig::from_env()
        .with_autoplay(true)
        .with_autoplay_delay(Duration::from_millis(1200))
        .with_loop(true);
    config.validate()?;

    println!("=== Marquee Carousel ===");
    println!("config: {}", serde_json::to_string(&config)?);

    let env = CarouselEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(StaticSource::from_json(EVENTS)?),
        Arc::new(LogNavigator),
    );
    let store = Store::new(
        CarouselState::new(Vec::new(), config),
        CarouselReducer::new(),
        env,
    );

    store
        .send(CarouselAction::Resized {
            container_width: 400.0,
        })
        .await?;
    let mut mount = store.send(CarouselAction::Mount).await?;
    mount.wait_with_timeout(Duration::from_millis(100)).await.ok();
    print_frame(&store, "mounted").await;

    // Let autoplay run through one full wrap.
    for tick in 1..=5 {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        print_frame(&store, &format!("tick {tick}")).await;
    }

    println!("\n>>> Drag right, released with a flick");
    store.send(CarouselAction::DragStarted).await?;
    store
        .send(CarouselAction::DragMoved { offset: 40.0 })
        .await?;
    store
        .send(CarouselAction::DragEnded {
            offset: 40.0,
            velocity: 650.0,
        })
        .await?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    print_frame(&store, "mid-flight").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    print_frame(&store, "settled").await;

    println!("\n>>> Select the last dot, then click it");
    store.send(CarouselAction::DotSelected { index: 3 }).await?;
    store.send(CarouselAction::ImageFailed { slot: 3 }).await?;
    store.send(CarouselAction::ItemClicked { slot: 3 }).await?;
    tokio::time::sleep(Duration::from_millis(600)).await;
    print_frame(&store, "dot 3").await;

    store.send(CarouselAction::Unmount).await?;
    store.shutdown(Duration::from_secs(1)).await?;
    println!("\n=== Carousel unmounted ===");
    Ok(())
}
