use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use vsm_ranker::{CancellationToken, CharMap, Document, Vsm};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // engine with hyphens treated as spaces
    let vsm = Arc::new(Vsm::new().with_normalizer(CharMap::hyphens_to_spaces()));

    for (text, label) in [
        ("Shipment of gold damaged in a fire.", "d1"),
        ("Shipment-of-gold-arrived in a truck.", "d3"),
    ] {
        if let Err(e) = vsm.train_one(Document::new(text, label)) {
            eprintln!("training {label} failed: {e}");
        }
    }

    // more documents arrive later through a channel
    let (tx, rx) = mpsc::channel(4);
    let stream = vsm.train_stream(CancellationToken::new(), rx);
    tokio::spawn(async move {
        let _ = tx
            .send(Document::new("Delivery of silver arrived in a silver truck.", "d2"))
            .await;
    });
    for outcome in stream.collect().await {
        println!("streamed: {:?}", outcome);
    }

    for query in ["gold silver truck.", "shipment gold in a flying truck.", "nothing here"] {
        match vsm.search(query) {
            Ok(Some(doc)) => println!("{query:?} -> {} ({})", doc.label, doc.text),
            Ok(None) => println!("{query:?} -> no match"),
            Err(e) => println!("{query:?} -> error: {e}"),
        }
    }

    println!("\nscores for \"gold silver truck.\":");
    if let Ok(hits) = vsm.similarity_scores("gold silver truck.") {
        for hit in hits {
            println!("  {:?}", hit);
        }
    }
    println!("{:?}", vsm);
}
