// Copyright (c) 2025-2026 The Tapsign Developers

//! Command line utility for building, checking and test-delivering
//! tap-to-sign request frames

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, LevelFilter};

use tapsign::{
    proto::{CallbackPolicy, Request, TransferRequest},
    transport::{
        mock::{CancelPoint, MockTransport},
        TagCapability,
    },
    Defaults, RequestParams, SessionHandle,
};

/// Tap-to-sign command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Defaults file seeding unset request fields
    #[clap(long)]
    config: Option<PathBuf>,

    /// Require URI-shaped callback addresses
    #[clap(long)]
    strict_callback: bool,

    /// Enable verbose logging
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Parser)]
#[non_exhaustive]
enum Actions {
    /// Build and validate a request frame
    Encode {
        /// Signing curve
        #[clap(long)]
        curve: Option<tapsign::proto::SigningCurve>,

        /// Key hashing scheme
        #[clap(long)]
        hashing: Option<tapsign::proto::KeyHashing>,

        /// Key encoding
        #[clap(long)]
        encoding: Option<tapsign::proto::KeyEncoding>,

        /// BIP-44 derivation path
        #[clap(long)]
        path: Option<String>,

        /// Digest to sign (omit for a public-key request)
        #[clap(long, default_value = "")]
        digest: String,

        /// Callback address
        #[clap(long, default_value = "")]
        callback: String,
    },

    /// Decode and validate a request frame
    Decode {
        /// Wire text to decode
        frame: String,
    },

    /// Build a raw transfer frame
    Transfer {
        /// Sender address
        #[clap(long)]
        address: String,

        /// Unsigned transaction text
        #[clap(long)]
        tx: String,
    },

    /// Run a frame through a scripted delivery session
    Deliver {
        /// Wire text to deliver
        frame: String,

        /// Number of tags the scripted transport reports
        #[clap(long, default_value = "1")]
        tags: usize,

        /// Tag capability the scripted transport reports
        #[clap(long, default_value = "read-write")]
        capability: TagCapability,

        /// Cancel the session before the write commits
        #[clap(long)]
        cancel: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Options::parse();

    // Setup logging
    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())?;

    let policy = match args.strict_callback {
        true => CallbackPolicy::RequireUri,
        false => CallbackPolicy::Opaque,
    };

    // Load stored defaults where provided
    let defaults = match &args.config {
        Some(p) => Defaults::load(p)?,
        None => Defaults::default(),
    };

    debug!("using defaults: {:?}", defaults);

    match args.cmd {
        Actions::Encode {
            curve,
            hashing,
            encoding,
            path,
            digest,
            callback,
        } => {
            let mut params = RequestParams::from_defaults(&defaults);
            params.curve = curve.unwrap_or(params.curve);
            params.hashing = hashing.unwrap_or(params.hashing);
            params.encoding = encoding.unwrap_or(params.encoding);
            params.path = path.unwrap_or(params.path);
            params.digest = digest;
            params.callback = callback;

            let request = params.build(policy)?;

            info!("{} request", request.kind());
            println!("{request}");
        }
        Actions::Decode { frame } => {
            let request = Request::from_wire(&frame, policy)?;

            info!("{} request", request.kind());
            println!("curve:    {}", request.curve);
            println!("hashing:  {}", request.hashing);
            println!("encoding: {}", request.encoding);
            println!("path:     {}", request.path);
            println!(
                "digest:   {}",
                request.digest.as_ref().map(|d| d.as_str()).unwrap_or("-")
            );
            println!("callback: {}", request.callback.as_deref().unwrap_or("-"));
        }
        Actions::Transfer { address, tx } => {
            let request = TransferRequest::new(address, tx);
            println!("{request}");
        }
        Actions::Deliver {
            frame,
            tags,
            capability,
            cancel,
        } => {
            // Frame must decode before anything is transmitted
            let request = Request::from_wire(&frame, policy)?;

            let mut transport = MockTransport::new()
                .with_tags(tags)
                .with_capability(capability);
            if cancel {
                transport = transport.cancel_at(CancelPoint::Write);
            }
            let log = transport.log();

            let handle = SessionHandle::new(transport);
            let ticket = handle.submit(&request)?;

            match ticket.wait().await {
                Some(context) => info!("delivered: {context}"),
                None => info!(
                    "not delivered: {}",
                    handle.last_status().await.unwrap_or_default()
                ),
            }

            for record in log.written().await {
                debug!("written record: {:02x?}", record.to_bytes());
            }
        }
    }

    Ok(())
}
