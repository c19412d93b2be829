//! Compile-time settings of the stats frontend.

/// Prefix for stats API requests, relative to the page origin
pub const API_BASE: &str = "/api/stats";

/// Prefix of the localStorage key holding the last Behaviours tab of a site
pub const STORAGE_KEY_PREFIX: &str = "behavioursTab__";

/// Tab identifier of the Conversions view; also the tab shown on first visit
pub const DEFAULT_TAB: &str = "conversions";

/// Endpoint of the live-view socket
pub const LIVE_SOCKET_PATH: &str = "/live/websocket";

/// Protocol version sent with the live socket handshake
pub const LIVE_SOCKET_VSN: &str = "2.0.0";

/// Global the embedding page sets with the site and query JSON
pub const CONTEXT_GLOBAL: &str = "__BEHAVIOURS_CONTEXT__";

/// Interval between live socket heartbeats
pub const LIVE_SOCKET_HEARTBEAT_MS: u32 = 30_000;

/// Reconnect delays by attempt; later attempts wait `LIVE_SOCKET_MAX_RECONNECT_MS`
pub const LIVE_SOCKET_RECONNECT_MS: [u32; 9] = [10, 50, 100, 150, 200, 250, 500, 1_000, 2_000];
pub const LIVE_SOCKET_MAX_RECONNECT_MS: u32 = 5_000;
