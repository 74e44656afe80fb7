//! Home Assistant WebSocket endpoint resolution

use url::Url;

use alarmpanel_core::prelude::*;

/// Path of the WebSocket API on a Home Assistant instance.
pub const WEBSOCKET_PATH: &str = "/api/websocket";

/// Turn a configured base URL into the WebSocket API URL.
///
/// Accepts `http`, `https`, `ws` and `wss`; `http(s)` is mapped to `ws(s)`
/// and the path is replaced with [`WEBSOCKET_PATH`].
pub fn websocket_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base.trim())
        .map_err(|e| Error::config_invalid(format!("Invalid Home Assistant URL {base:?}: {e}")))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(Error::config_invalid(format!(
                "Unsupported URL scheme {other:?} (expected http, https, ws or wss)"
            )))
        }
    };

    url.set_scheme(scheme)
        .map_err(|_| Error::config_invalid(format!("Cannot use scheme {scheme} for {base:?}")))?;
    url.set_path(WEBSOCKET_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_maps_to_ws() {
        let url = websocket_url("http://homeassistant.local:8123").unwrap();
        assert_eq!(url.as_str(), "ws://homeassistant.local:8123/api/websocket");
    }

    #[test]
    fn test_https_maps_to_wss_and_replaces_path() {
        let url = websocket_url("https://ha.example.com/lovelace/0?kiosk").unwrap();
        assert_eq!(url.as_str(), "wss://ha.example.com/api/websocket");
    }

    #[test]
    fn test_ws_kept() {
        let url = websocket_url(" ws://10.0.0.5:8123/api/websocket ").unwrap();
        assert_eq!(url.as_str(), "ws://10.0.0.5:8123/api/websocket");
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = websocket_url("ftp://ha.local").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(websocket_url("not a url").is_err());
    }
}
