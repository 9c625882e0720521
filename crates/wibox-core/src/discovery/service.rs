//! Broadcast discovery service.
//!
//! A scan owns one socket for its whole duration: bind, send the query once,
//! then collect replies until the window closes. The socket is dropped when
//! the scan returns, on every path.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use super::collector::ReplyCollector;
use crate::error::DiscoveryError;
use crate::protocol::{DISCOVERY_PORT, DISCOVERY_QUERY, MAX_REPLY_LEN};
use crate::types::DiscoveredDevice;

/// Default listen window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(4);

/// Sleep between receive attempts
pub const DEFAULT_PACE: Duration = Duration::from_secs(1);

// Diagnostics go to info/warn only when the caller asked for verbose output.
macro_rules! diag {
    ($verbose:expr, $level:ident, $($arg:tt)*) => {
        if $verbose {
            $level!($($arg)*);
        } else {
            debug!($($arg)*);
        }
    };
}

/// Options for a single scan.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Local port bound on the wildcard address
    pub port: u16,
    /// Destination of the query datagram
    pub target: SocketAddr,
    /// Total listen time
    pub window: Duration,
    /// Sleep after every receive attempt
    pub pace: Duration,
    /// Emit diagnostics at info/warn level
    pub verbose: bool,
}

impl DiscoveryOptions {
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// Per-receive wait: a quarter of the window.
    pub fn recv_timeout(&self) -> Duration {
        self.window / 4
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            port: DISCOVERY_PORT,
            target: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, DISCOVERY_PORT)),
            window: DEFAULT_WINDOW,
            pace: DEFAULT_PACE,
            verbose: false,
        }
    }
}

/// Create a broadcast-capable UDP socket bound to `0.0.0.0:port`.
pub fn create_broadcast_socket(port: u16) -> Result<std::net::UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;

    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
    socket.bind(&addr.into())?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// One-shot discovery of WiBox devices.
pub struct DiscoveryService {
    options: DiscoveryOptions,
}

impl DiscoveryService {
    pub fn new(options: DiscoveryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Broadcast the query and collect replies for the configured window.
    ///
    /// Returns an error only when the socket cannot be set up or the query
    /// cannot be sent; an empty list means nobody answered.
    pub async fn discover(&self) -> Result<Vec<DiscoveredDevice>, DiscoveryError> {
        let verbose = self.options.verbose;

        let socket = match self.bind() {
            Ok(socket) => socket,
            Err(e) => {
                diag!(verbose, warn, "DiscoverWiBox: failed to create and configure socket: {}", e);
                return Err(DiscoveryError::Socket(e));
            }
        };

        diag!(verbose, info, "DiscoverWiBox: sending broadcast query to {}", self.options.target);
        if let Err(e) = socket.send_to(&DISCOVERY_QUERY, self.options.target).await {
            diag!(verbose, warn, "DiscoverWiBox: error sending broadcast query: {}", e);
            return Err(DiscoveryError::Send(e));
        }

        let recv_timeout = self.options.recv_timeout();
        let mut collector = ReplyCollector::new();
        let mut buf = [0u8; MAX_REPLY_LEN];
        let start = Instant::now();

        while start.elapsed() < self.options.window {
            match timeout(recv_timeout, socket.recv_from(&mut buf)).await {
                Ok(Ok((len, addr))) => {
                    if collector.accept(&buf[..len], addr) {
                        debug!("Discovery reply from {}", addr);
                    } else {
                        debug!("Ignoring {} byte datagram from {}", len, addr);
                    }
                }
                Ok(Err(e)) => {
                    diag!(verbose, warn, "DiscoverWiBox: receive error: {}", e);
                }
                Err(_) => {
                    // Nothing arrived this tick
                }
            }

            sleep(self.options.pace).await;
        }

        diag!(verbose, info, "DiscoverWiBox: {} devices found", collector.len());

        Ok(collector.into_devices())
    }

    fn bind(&self) -> Result<UdpSocket, std::io::Error> {
        let std_socket = create_broadcast_socket(self.options.port)?;
        UdpSocket::from_std(std_socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MARKER_OFFSET, REPLY_MARKER};
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tokio::task::JoinHandle;

    fn test_options(target: SocketAddr, window_ms: u64) -> DiscoveryOptions {
        DiscoveryOptions {
            port: 0,
            target,
            window: Duration::from_millis(window_ms),
            pace: Duration::from_millis(20),
            verbose: false,
        }
    }

    fn reply(marker: u8, tag: u8) -> Vec<u8> {
        let mut payload = vec![0u8; 64];
        payload[MARKER_OFFSET] = marker;
        payload[24..30].copy_from_slice(&[tag; 6]);
        payload
    }

    /// Fake device: waits for the query, then answers after `delay`.
    async fn spawn_responder(
        replies: Vec<Vec<u8>>,
        delay: Duration,
    ) -> (SocketAddr, JoinHandle<Vec<u8>>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut buf = [0u8; 16];
            let (len, from) = socket.recv_from(&mut buf).await.unwrap();
            sleep(delay).await;
            for reply in &replies {
                socket.send_to(reply, from).await.unwrap();
            }
            buf[..len].to_vec()
        });

        (addr, handle)
    }

    #[test]
    fn test_default_options() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.port, 30718);
        assert_eq!(options.target, "255.255.255.255:30718".parse().unwrap());
        assert_eq!(options.window, Duration::from_secs(4));
        assert_eq!(options.recv_timeout(), Duration::from_secs(1));
        assert!(!options.verbose);
    }

    #[test]
    fn test_recv_timeout_is_quarter_window() {
        let options = DiscoveryOptions::with_window(Duration::from_secs(3));
        assert_eq!(options.recv_timeout(), Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_discover_sends_query_and_collects_replies_in_order() {
        let (target, responder) = spawn_responder(
            vec![reply(REPLY_MARKER, 0x05), reply(REPLY_MARKER, 0x09)],
            Duration::ZERO,
        )
        .await;

        let service = DiscoveryService::new(test_options(target, 600));
        let devices = service.discover().await.unwrap();

        assert_eq!(responder.await.unwrap(), DISCOVERY_QUERY.to_vec());
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].metadata.to_hex(), "050505050505");
        assert_eq!(devices[1].metadata.to_hex(), "090909090909");
        assert!(devices.iter().all(|d| d.address.is_loopback()));
    }

    #[tokio::test]
    async fn test_discover_ignores_invalid_marker() {
        let (target, responder) =
            spawn_responder(vec![reply(0x00, 0x05)], Duration::ZERO).await;

        let service = DiscoveryService::new(test_options(target, 400));
        let devices = service.discover().await.unwrap();

        responder.await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn test_discover_keeps_listening_after_receive_timeout() {
        // Reply lands after the first receive has already timed out.
        let (target, responder) =
            spawn_responder(vec![reply(REPLY_MARKER, 0x07)], Duration::from_millis(300)).await;

        let service = DiscoveryService::new(test_options(target, 800));
        let devices = service.discover().await.unwrap();

        responder.await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].metadata.to_hex(), "070707070707");
    }

    #[tokio::test]
    async fn test_discover_returns_within_window() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = silent.local_addr().unwrap();

        let options = test_options(target, 300);
        let bound = options.window + options.recv_timeout() + options.pace + Duration::from_millis(500);

        let started = std::time::Instant::now();
        let devices = DiscoveryService::new(options).discover().await.unwrap();

        assert!(devices.is_empty());
        assert!(started.elapsed() < bound);
    }

    #[tokio::test]
    async fn test_bind_failure_is_not_an_empty_list() {
        let holder = std::net::UdpSocket::bind("0.0.0.0:0").unwrap();
        let port = holder.local_addr().unwrap().port();

        let mut options = test_options("127.0.0.1:9".parse().unwrap(), 200);
        options.port = port;

        let result = DiscoveryService::new(options).discover().await;
        assert!(matches!(result, Err(DiscoveryError::Socket(_))));
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let options = test_options("[::1]:30718".parse().unwrap(), 200);

        let result = DiscoveryService::new(options).discover().await;
        assert!(matches!(result, Err(DiscoveryError::Send(_))));
    }

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_verbose_bind_failure_logs_os_error() {
        let holder = std::net::UdpSocket::bind("0.0.0.0:0").unwrap();
        let port = holder.local_addr().unwrap().port();

        let capture = CaptureWriter::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let mut options = test_options("127.0.0.1:9".parse().unwrap(), 200);
        options.port = port;
        options.verbose = true;

        let result = tracing::subscriber::with_default(subscriber, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(DiscoveryService::new(options).discover())
        });

        let err = result.unwrap_err();
        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("failed to create and configure socket"));
        assert!(output.contains(&err.io_error().to_string()));
    }

    #[test]
    fn test_quiet_bind_failure_logs_nothing_at_info() {
        let holder = std::net::UdpSocket::bind("0.0.0.0:0").unwrap();
        let port = holder.local_addr().unwrap().port();

        let capture = CaptureWriter::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let mut options = test_options("127.0.0.1:9".parse().unwrap(), 200);
        options.port = port;

        let result = tracing::subscriber::with_default(subscriber, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(DiscoveryService::new(options).discover())
        });

        assert!(result.is_err());
        assert!(capture.0.lock().unwrap().is_empty());
    }
}
