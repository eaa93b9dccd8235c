//! # Fortune pub/sub demo.
//!
//! Runs the producer and the subscriber over one loopback broker: the
//! producer publishes `--samples` fortunes and byte frames at the 3-second
//! cadence, the subscriber multiplexes both streams through the wait set and
//! prints every sample until it has seen `--samples` of them.
//!
//! ## Run
//! ```bash
//! cargo run --example pubsub -- --samples 5 --verbosity info
//! ```
//!
//! Ctrl-C (or SIGTERM/SIGQUIT) stops both loops within one pacing interval.

use tokio_util::sync::CancellationToken;

use fortunecast::{
    cancel_on_signal, parse_args, Broker, FortuneStore, Producer, Subscriber, Verbosity, USAGE,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let cfg = args.config;
    let store = match &args.fortunes {
        Some(path) => FortuneStore::load(path),
        None => FortuneStore::load("fortunes"),
    };
    if cfg.verbosity >= Verbosity::Info {
        eprintln!("fortune store holds {} entries", store.len());
    }

    let broker = Broker::new(cfg.domain_id);
    let token = CancellationToken::new();
    cancel_on_signal(token.clone());

    // Readers must attach before the first publish.
    let subscriber = Subscriber::new(&broker, &cfg)?;
    let tally = subscriber.tally();
    let producer = Producer::new(&broker, &cfg, store)?;

    let receiving = tokio::spawn(subscriber.run(token.clone()));
    let written = producer.run(token.clone()).await?;
    if cfg.verbosity >= Verbosity::Info {
        eprintln!("producer finished after {written} publish cycles");
    }

    let received = receiving.await?;
    if cfg.verbosity >= Verbosity::Info {
        eprintln!(
            "subscriber finished with {received} samples ({} state changes)",
            tally.state_changes()
        );
    }
    Ok(())
}
