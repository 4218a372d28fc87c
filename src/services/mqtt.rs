//! MQTT client handler for the display.
//!
//! Subscribes to the display topics and feeds [`SharedDisplayState`]:
//!
//! **Subscribe Topics:**
//! - `matrix/weather/{cond,temp,summary}` - Weather text
//! - `matrix/spotify/{track,artist}` - Now playing
//! - `matrix/control/{brightness,page,rotate_secs}` - Display control
//! - `matrix/sensors/{living,bedroom,outdoor}` - Room temperatures
//!
//! **Publish Topics:**
//! - `matrix/status` - `online` on connect, `offline` on shutdown and as
//!   last will (retained)
//! - `matrix/tele/page` - Active page name on change
//!
//! # Example
//!
//! ```ignore
//! let state = Arc::new(SharedDisplayState::default());
//! let handler = MqttHandler::new(Arc::clone(&state), MqttRuntimeConfig::from_config(&config.mqtt));
//! tokio::spawn(handler.run(shutdown.clone()));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rumqttc::{
    AsyncClient, Event, LastWill, MqttOptions, Outgoing, Packet, QoS, SubscribeFilter,
};

use crate::config::MqttConfig as SharedMqttConfig;
use crate::messages::{
    ingest, STATUS_OFFLINE, STATUS_ONLINE, SUBSCRIBE_TOPICS, TOPIC_STATUS, TOPIC_TELE_PAGE,
};
use crate::render::Shutdown;
use crate::state::SharedDisplayState;

/// How often the handler checks for shutdown between broker events.
const HOUSEKEEPING_PERIOD: Duration = Duration::from_millis(100);

/// Back-off after a connection error.
const RETRY_DELAY: Duration = Duration::from_secs(5);

// ============================================================================
// Configuration
// ============================================================================

/// Runtime MQTT client configuration for `rumqttc`.
///
/// This struct uses `String` for runtime compatibility with the `rumqttc` library.
/// The file-backed [`crate::config::MqttConfig`] uses fixed-size
/// `ShortString` types; convert with [`MqttRuntimeConfig::from_config`].
#[derive(Debug, Clone)]
pub struct MqttRuntimeConfig {
    /// MQTT broker hostname
    pub host: String,
    /// MQTT broker port
    pub port: u16,
    /// Client ID
    pub client_id: String,
    /// Topic prefix (default: "matrix")
    pub topic_prefix: String,
    /// Username (empty = anonymous)
    pub username: String,
    /// Password
    pub password: String,
    /// Page telemetry interval in milliseconds
    pub telemetry_ms: u64,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u16,
}

impl Default for MqttRuntimeConfig {
    fn default() -> Self {
        Self::from_config(&SharedMqttConfig::default())
    }
}

impl MqttRuntimeConfig {
    /// Create a new config with the given broker address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from shared MqttConfig
    pub fn from_config(config: &SharedMqttConfig) -> Self {
        Self {
            host: config.host.as_str().to_string(),
            port: config.port,
            client_id: config.client_id.as_str().to_string(),
            topic_prefix: config.topic_prefix.as_str().to_string(),
            username: config.username.as_str().to_string(),
            password: config.password.as_str().to_string(),
            telemetry_ms: config.telemetry_ms as u64,
            keep_alive_secs: config.keep_alive_secs,
        }
    }

    /// Set the client ID
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Set the topic prefix
    pub fn topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    /// Set the page telemetry interval
    pub fn telemetry_ms(mut self, ms: u64) -> Self {
        self.telemetry_ms = ms;
        self
    }

    /// Set broker credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Build a full topic path.
    pub fn topic(&self, suffix: &str) -> String {
        format!("{}/{}", self.topic_prefix, suffix)
    }

    /// Client options, including the retained `offline` last will.
    pub fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(Duration::from_secs(self.keep_alive_secs as u64));
        if !self.username.is_empty() {
            options.set_credentials(&self.username, &self.password);
        }
        options.set_last_will(LastWill::new(
            self.topic(TOPIC_STATUS),
            STATUS_OFFLINE,
            QoS::AtLeastOnce,
            true,
        ));
        options
    }

    fn subscriptions(&self) -> Vec<SubscribeFilter> {
        SUBSCRIBE_TOPICS
            .iter()
            .map(|suffix| SubscribeFilter::new(self.topic(suffix), QoS::AtLeastOnce))
            .collect()
    }
}

// ============================================================================
// MQTT Handler
// ============================================================================

/// Bridges the broker to the shared display state.
pub struct MqttHandler {
    state: Arc<SharedDisplayState>,
    config: MqttRuntimeConfig,
}

impl MqttHandler {
    /// Create a handler writing into `state`.
    pub fn new(state: Arc<SharedDisplayState>, config: MqttRuntimeConfig) -> Self {
        Self { state, config }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> Arc<SharedDisplayState> {
        Arc::clone(&self.state)
    }

    /// Runs until `shutdown` is requested.
    ///
    /// Connection errors are logged and retried after a back-off; the
    /// display keeps rendering whatever it last received. On shutdown the
    /// handler publishes `offline` and disconnects cleanly.
    pub async fn run(self, shutdown: Shutdown) -> Result<(), MqttError> {
        let (client, mut eventloop) = AsyncClient::new(self.config.options(), 32);
        let prefix = self.config.topic_prefix.clone();
        let telemetry_period = Duration::from_millis(self.config.telemetry_ms.max(1));
        let mut last_telemetry = Instant::now();
        let mut housekeeping = tokio::time::interval(HOUSEKEEPING_PERIOD);

        log::info!(
            "MQTT connecting to {}:{} as {}",
            self.config.host,
            self.config.port,
            self.config.client_id
        );

        loop {
            tokio::select! {
                event = eventloop.poll() => match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        log::info!("MQTT connected to {}:{}", self.config.host, self.config.port);
                        client
                            .subscribe_many(self.config.subscriptions())
                            .await
                            .map_err(|e| MqttError::Subscribe(e.to_string()))?;
                        log::info!("subscribed to {} topics under {}/", SUBSCRIBE_TOPICS.len(), prefix);
                        client
                            .publish(self.config.topic(TOPIC_STATUS), QoS::AtLeastOnce, true, STATUS_ONLINE)
                            .await
                            .map_err(|e| MqttError::Publish(e.to_string()))?;
                        self.state.reset_page_change();
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        ingest(&self.state, &prefix, &publish.topic, &publish.payload);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("MQTT error: {}, retrying in {:?}", e, RETRY_DELAY);
                        if wait_or_shutdown(&shutdown, RETRY_DELAY).await {
                            break;
                        }
                    }
                },
                _ = housekeeping.tick() => {
                    if shutdown.is_requested() {
                        break;
                    }
                    if last_telemetry.elapsed() >= telemetry_period {
                        last_telemetry = Instant::now();
                        if let Some(page) = self.state.check_page_change() {
                            if let Err(e) = client
                                .publish(self.config.topic(TOPIC_TELE_PAGE), QoS::AtLeastOnce, false, page.name())
                                .await
                            {
                                log::warn!("MQTT page telemetry failed: {}", e);
                            }
                        }
                    }
                }
            }
        }

        self.disconnect(&client, &mut eventloop).await;
        Ok(())
    }

    async fn disconnect(&self, client: &AsyncClient, eventloop: &mut rumqttc::EventLoop) {
        let offline = client
            .publish(self.config.topic(TOPIC_STATUS), QoS::AtLeastOnce, true, STATUS_OFFLINE)
            .await;
        let disconnect = client.disconnect().await;
        if offline.is_err() || disconnect.is_err() {
            log::warn!("MQTT could not queue offline status");
            return;
        }

        // Drive the event loop until the disconnect is on the wire
        let flushed = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        })
        .await;
        if flushed.is_err() {
            log::warn!("MQTT disconnect timed out");
        } else {
            log::info!("MQTT disconnected");
        }
    }
}

/// Sleeps for `delay`, waking early on shutdown.
///
/// Returns true if shutdown was requested.
async fn wait_or_shutdown(shutdown: &Shutdown, delay: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + delay;
    let mut check = tokio::time::interval(HOUSEKEEPING_PERIOD);
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => return shutdown.is_requested(),
            _ = check.tick() => {
                if shutdown.is_requested() {
                    return true;
                }
            }
        }
    }
}

/// MQTT-related errors
#[derive(Debug)]
pub enum MqttError {
    /// Failed to subscribe to topic
    Subscribe(String),
    /// Failed to publish message
    Publish(String),
}

impl fmt::Display for MqttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MqttError::Subscribe(e) => write!(f, "MQTT subscribe failed: {}", e),
            MqttError::Publish(e) => write!(f, "MQTT publish failed: {}", e),
        }
    }
}

impl std::error::Error for MqttError {}
