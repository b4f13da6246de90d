//! Validates swap requests against a [`PriceCatalog`] and computes the
//! converted amount.
//!
//! [`convert`] is a pure function of the catalog and the request. The
//! [`ConversionEngine`] wraps it with the per-request state machine
//! (`Idle -> Validating -> Failed | Resolving -> Failed | Succeeded`) and the
//! cosmetic processing delay, publishing each state on a watch channel so a
//! caller can render a pending indicator.

use super::catalog::PriceCatalog;
use super::error::SwapError;
use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Number of decimal places in every reported output.
pub const OUTPUT_DECIMALS: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source: String,
    pub destination: String,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(source: &str, destination: &str, amount: f64) -> Result<Self, SwapError> {
        let source = source.trim();
        let destination = destination.trim();
        if source.is_empty() {
            return Err(SwapError::invalid_input("no source token selected"));
        }
        if destination.is_empty() {
            return Err(SwapError::invalid_input("no destination token selected"));
        }
        if !amount.is_finite() {
            return Err(SwapError::invalid_input(format!(
                "amount {amount} is not a finite number"
            )));
        }
        if amount <= 0.0 {
            return Err(SwapError::invalid_input(format!(
                "amount {amount} must be greater than zero"
            )));
        }
        Ok(Self {
            source: source.to_string(),
            destination: destination.to_string(),
            amount,
        })
    }

    /// Builds a request from raw user input, parsing the amount text.
    pub fn parse(source: &str, destination: &str, amount: &str) -> Result<Self, SwapError> {
        let text = amount.trim();
        if text.is_empty() {
            return Err(SwapError::invalid_input("no amount entered"));
        }
        let value: f64 = text
            .parse()
            .map_err(|_| SwapError::invalid_input(format!("amount '{text}' is not a number")))?;
        Self::new(source, destination, value)
    }
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub request: ConversionRequest,
    /// Destination units received per source unit.
    pub rate: f64,
    /// Converted amount, always carrying exactly four decimal places.
    pub output: Decimal,
}

/// Computes `request.amount` expressed in the destination token.
///
/// Prices are unit values in a shared reference currency, so one source unit
/// is worth `source_price / destination_price` destination units. The result
/// is rounded half away from zero to [`OUTPUT_DECIMALS`] places.
pub fn convert(catalog: &PriceCatalog, request: &ConversionRequest) -> Result<Conversion, SwapError> {
    let source_price = catalog.lookup_price(&request.source);
    let destination_price = catalog.lookup_price(&request.destination);

    let (source_price, destination_price) = match (source_price, destination_price) {
        (Some(s), Some(d)) => (s, d),
        (s, d) => {
            let mut ids = Vec::new();
            if s.is_none() {
                ids.push(request.source.clone());
            }
            if d.is_none() && request.destination != request.source {
                ids.push(request.destination.clone());
            }
            return Err(SwapError::UnknownToken { ids });
        }
    };

    let rate = source_price / destination_price;
    if !rate.is_finite() {
        return Err(SwapError::computation(format!(
            "rate {}/{} is not finite",
            request.source, request.destination
        )));
    }

    let raw = request.amount * rate;
    if !raw.is_finite() {
        return Err(SwapError::computation(format!(
            "{} {} does not fit in {}",
            request.amount, request.source, request.destination
        )));
    }

    let output = round_output(raw)?;
    debug!(
        source = %request.source,
        destination = %request.destination,
        rate,
        %output,
        "Converted"
    );

    Ok(Conversion {
        request: request.clone(),
        rate,
        output,
    })
}

fn round_output(value: f64) -> Result<Decimal, SwapError> {
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| SwapError::computation(format!("{value} is out of range")))?;
    let mut rounded =
        decimal.round_dp_with_strategy(OUTPUT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(OUTPUT_DECIMALS);
    // rescale quietly drops decimals once the integer part needs the room.
    if rounded.scale() != OUTPUT_DECIMALS {
        return Err(SwapError::computation(format!(
            "{value} is too large to report with {OUTPUT_DECIMALS} decimals"
        )));
    }
    Ok(rounded)
}

/// Strategy for the simulated processing latency of a conversion.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed duration on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Delay for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionState {
    Idle,
    Validating,
    Resolving,
    Failed(SwapError),
    Succeeded(Conversion),
}

impl ConversionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ConversionState::Validating | ConversionState::Resolving)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversionState::Failed(_) | ConversionState::Succeeded(_))
    }
}

/// Runs conversions and publishes the state of the latest request.
pub struct ConversionEngine<D: Delay = FixedDelay> {
    delay: D,
    generation: AtomicU64,
    published: AtomicU64,
    state: watch::Sender<ConversionState>,
}

impl<D: Delay> ConversionEngine<D> {
    pub fn new(delay: D) -> Self {
        let (state, _) = watch::channel(ConversionState::Idle);
        Self {
            delay,
            generation: AtomicU64::new(0),
            published: AtomicU64::new(0),
            state,
        }
    }

    /// Subscribes to state changes of the most recent request.
    pub fn subscribe(&self) -> watch::Receiver<ConversionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ConversionState {
        self.state.borrow().clone()
    }

    /// Id of the request whose state is currently published, 0 before any.
    pub fn published_request(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }

    /// Validates the raw inputs and converts them after the configured delay.
    ///
    /// Every call starts a fresh request. Its result is always returned to
    /// the caller, but it only becomes the published state if no newer
    /// request was submitted in the meantime.
    pub async fn submit(
        &self,
        catalog: &PriceCatalog,
        source: &str,
        destination: &str,
        amount: &str,
    ) -> Result<Conversion, SwapError> {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(request = id, "Conversion submitted");

        self.publish(id, ConversionState::Validating);
        let request = match ConversionRequest::parse(source, destination, amount) {
            Ok(request) => request,
            Err(e) => {
                self.publish(id, ConversionState::Failed(e.clone()));
                return Err(e);
            }
        };

        self.publish(id, ConversionState::Resolving);
        self.delay.wait().await;

        let result = convert(catalog, &request);
        let state = match &result {
            Ok(conversion) => ConversionState::Succeeded(conversion.clone()),
            Err(e) => ConversionState::Failed(e.clone()),
        };
        self.publish(id, state);
        result
    }

    fn publish(&self, id: u64, state: ConversionState) {
        // The generation check runs under the channel lock so a newer
        // request's writes are always ordered after ours.
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != id {
                return false;
            }
            *current = state;
            self.published.store(id, Ordering::SeqCst);
            true
        });
        if !published {
            debug!(request = id, "Superseded, not publishing state");
        }
    }
}
