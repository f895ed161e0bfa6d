use reqwest::blocking::{Client, Response};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::decode::{decode_player_search, decode_season_averages, decode_team_search};
use crate::error::{LookupError, Result};
use crate::models::{PlayerRecord, SeasonStats, TeamMedia};
use crate::season::Season;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Performs one HTTP GET and hands back the response body.
///
/// Implementations must map network failures and every non-2xx status to
/// [`LookupError::Transport`].  The production implementation is
/// [`ReqwestTransport`]; tests substitute a canned one.
pub trait HttpTransport {
    fn get(&self, url: &str, authorization: Option<&str>) -> Result<String>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str, authorization: Option<&str>) -> Result<String> {
        (**self).get(url, authorization)
    }
}

/// Blocking [`reqwest`] transport.
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("nba-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http })
    }

    fn handle_response(&self, url: &str, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success response");
            return Err(LookupError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {} from {}", status.as_u16(), strip_query(url)),
            });
        }
        Ok(response.text()?)
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, authorization: Option<&str>) -> Result<String> {
        let mut request = self.http.get(url);
        if let Some(key) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, key);
        }
        let response = request.send()?;
        self.handle_response(url, response)
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Join `key=value` pairs, percent-encoding values (spaces become `%20`).
/// Keys are sent verbatim so `player_ids[]` keeps its brackets.
fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Entry point for the three lookups.
///
/// ```no_run
/// use nba_tracker::{Config, NbaClient};
///
/// let client = NbaClient::new(&Config::default()).unwrap();
/// let player = client.players().find("LeBron James").unwrap();
/// println!("{} plays for {}", player.full_name(), player.current_team_name);
/// ```
pub struct NbaClient<T = ReqwestTransport> {
    transport: T,
    balldontlie_url: String,
    balldontlie_key: Option<String>,
    sportsdb_url: String,
    sportsdb_key: String,
}

impl NbaClient<ReqwestTransport> {
    /// Create a client backed by a blocking reqwest transport.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?, config))
    }
}

impl<T: HttpTransport> NbaClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, config: &Config) -> Self {
        Self {
            transport,
            balldontlie_url: config.balldontlie_url.trim_end_matches('/').to_string(),
            balldontlie_key: config.balldontlie_key.clone(),
            sportsdb_url: config.sportsdb_url.trim_end_matches('/').to_string(),
            sportsdb_key: config.sportsdb_key.clone(),
        }
    }

    fn balldontlie_get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{endpoint}?{}", self.balldontlie_url, encode_query(query));
        debug!(%url, "balldontlie request");
        self.transport.get(&url, self.balldontlie_key.as_deref())
    }

    fn sportsdb_get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!(
            "{}/{}{endpoint}?{}",
            self.sportsdb_url,
            self.sportsdb_key,
            encode_query(query)
        );
        debug!(%url, "sportsdb request");
        self.transport.get(&url, None)
    }

    // -- sub-client accessors ------------------------------------------------

    pub fn players(&self) -> PlayersClient<'_, T> {
        PlayersClient { client: self }
    }

    pub fn season_averages(&self) -> SeasonAveragesClient<'_, T> {
        SeasonAveragesClient { client: self }
    }

    pub fn teams(&self) -> TeamsClient<'_, T> {
        TeamsClient { client: self }
    }
}

// ===========================================================================
// Sub-clients
// ===========================================================================

// ---- Players --------------------------------------------------------------

pub struct PlayersClient<'a, T> {
    client: &'a NbaClient<T>,
}

impl<T: HttpTransport> PlayersClient<'_, T> {
    /// All players matching `name`, in API order.
    #[instrument(skip(self))]
    pub fn search(&self, name: &str) -> Result<Vec<PlayerRecord>> {
        let body = self
            .client
            .balldontlie_get("/players", &[("search", name.trim())])?;
        decode_player_search(&body)
    }

    /// The first player matching `name`.  No disambiguation is attempted.
    pub fn find(&self, name: &str) -> Result<PlayerRecord> {
        if name.trim().is_empty() {
            return Err(LookupError::NotFound);
        }
        let player = self
            .search(name)?
            .into_iter()
            .next()
            .ok_or(LookupError::NotFound)?;
        debug!(id = player.id, team = %player.current_team_name, "player matched");
        Ok(player)
    }
}

// ---- Season averages ------------------------------------------------------

pub struct SeasonAveragesClient<'a, T> {
    client: &'a NbaClient<T>,
}

impl<T: HttpTransport> SeasonAveragesClient<'_, T> {
    /// Regular-season averages of one player.
    #[instrument(skip(self))]
    pub fn get(&self, player_id: u64, season: Season) -> Result<SeasonStats> {
        let year = season.year();
        let id = player_id.to_string();
        let body = self.client.balldontlie_get(
            "/season_averages",
            &[
                ("season", year.as_str()),
                ("player_ids[]", id.as_str()),
                ("postseason", "false"),
            ],
        )?;
        decode_season_averages(&body)?
            .into_iter()
            .next()
            .ok_or(LookupError::NoStatsForSeason)
    }
}

// ---- Teams ----------------------------------------------------------------

pub struct TeamsClient<'a, T> {
    client: &'a NbaClient<T>,
}

impl<T: HttpTransport> TeamsClient<'_, T> {
    /// All teams matching `name`.
    #[instrument(skip(self))]
    pub fn search(&self, name: &str) -> Result<Vec<TeamMedia>> {
        let body = self
            .client
            .sportsdb_get("/searchteams.php", &[("t", name.trim())])?;
        decode_team_search(&body)
    }

    /// The first team matching `name`.
    pub fn find(&self, name: &str) -> Result<TeamMedia> {
        self.search(name)?
            .into_iter()
            .next()
            .ok_or(LookupError::TeamNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    use super::*;

    /// Accept one connection on a loopback port, answer it with `response`
    /// and hand back the raw request head.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn transport() -> ReqwestTransport {
        let config = Config {
            timeout: Duration::from_secs(5),
            ..Config::default()
        };
        ReqwestTransport::new(&config).unwrap()
    }

    #[test]
    fn non_success_status_maps_to_transport_error() {
        let (base, server) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

        let err = transport()
            .get(&format!("{base}/players?search=x"), None)
            .unwrap_err();
        server.join().unwrap();

        match err {
            LookupError::Transport { status, message } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, format!("HTTP 404 from {base}/players"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_returns_body_and_sends_authorization() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"data\":[]}",
        );

        let body = transport()
            .get(&format!("{base}/players?search=x"), Some("secret-key"))
            .unwrap();
        let request = server.join().unwrap().to_ascii_lowercase();

        assert_eq!(body, r#"{"data":[]}"#);
        assert!(request.starts_with("get /players?search=x "));
        assert!(request.contains("authorization: secret-key"));
        assert!(request.contains("accept: application/json"));
    }

    #[test]
    fn refused_connection_has_no_status() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = transport()
            .get(&format!("http://{addr}/players"), None)
            .unwrap_err();

        assert!(matches!(err, LookupError::Transport { status: None, .. }));
        assert!(err.to_string().starts_with("Request failed:"));
    }

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(
            encode_query(&[("search", "LeBron James")]),
            "search=LeBron%20James"
        );
        assert_eq!(
            encode_query(&[("player_ids[]", "237"), ("postseason", "false")]),
            "player_ids[]=237&postseason=false"
        );
    }

    #[test]
    fn strip_query_drops_parameters() {
        assert_eq!(
            strip_query("https://x.test/players?search=a"),
            "https://x.test/players"
        );
        assert_eq!(strip_query("https://x.test/players"), "https://x.test/players");
    }
}
