//! SOCKS5 proxy stub (RFC 1928/1929) that terminates the tunnel itself.
//!
//! Performs the greeting, optional username/password sub-negotiation and
//! CONNECT, records what the client asked for, then answers the tunneled
//! HTTP request directly with a canned response.

use super::http_server::{read_request, write_response, CannedResponse, RecordedRequest};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const VERSION: u8 = 0x05;
const METHOD_NONE: u8 = 0x00;
const METHOD_USER_PASS: u8 = 0x02;
const METHOD_UNACCEPTABLE: u8 = 0xFF;

#[derive(Debug, Clone, Default)]
pub struct Socks5Session {
    /// Methods offered in the client greeting.
    pub offered_methods: Vec<u8>,
    /// Credentials received in the 0x02 sub-negotiation.
    pub credentials: Option<(String, String)>,
    /// CONNECT target as `host:port`.
    pub target: String,
    /// Address type of the CONNECT request (0x01 IPv4, 0x03 domain, 0x04 IPv6).
    pub address_type: u8,
    pub request: Option<RecordedRequest>,
}

#[derive(Clone)]
pub struct Socks5Proxy {
    pub host: String,
    pub port: u16,
    sessions: Arc<Mutex<Vec<Socks5Session>>>,
}

impl Socks5Proxy {
    pub fn sessions(&self) -> Vec<Socks5Session> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn last_session(&self) -> Socks5Session {
        self.sessions().pop().expect("proxy saw no session")
    }
}

/// Starts a proxy. With `credentials`, method 0x02 is required and checked;
/// without, only the anonymous method is accepted.
pub fn start(credentials: Option<(&str, &str)>, response: CannedResponse) -> Socks5Proxy {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let sessions = Arc::new(Mutex::new(Vec::new()));
    let expected = credentials.map(|(u, p)| (u.to_string(), p.to_string()));

    let proxy = Socks5Proxy {
        host: "127.0.0.1".to_string(),
        port,
        sessions: Arc::clone(&sessions),
    };

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let sessions = Arc::clone(&sessions);
            let expected = expected.clone();
            let response = response.clone();
            thread::spawn(move || {
                let mut session = Socks5Session::default();
                let _ = serve(stream, expected.as_ref(), &response, &mut session, &sessions);
            });
        }
    });
    proxy
}

fn serve(
    mut stream: TcpStream,
    expected: Option<&(String, String)>,
    response: &CannedResponse,
    session: &mut Socks5Session,
    sessions: &Mutex<Vec<Socks5Session>>,
) -> std::io::Result<()> {
    let result = negotiate(&mut stream, expected, session);
    // record before answering
    sessions.lock().unwrap().push(session.clone());
    if result? {
        write_response(&mut stream, &session_method(session), response);
    }
    Ok(())
}

fn session_method(session: &Socks5Session) -> String {
    session
        .request
        .as_ref()
        .map(|r| r.method.clone())
        .unwrap_or_default()
}

/// Runs the handshake and reads the tunneled request. Returns true when a
/// request is ready to be answered.
fn negotiate(
    stream: &mut TcpStream,
    expected: Option<&(String, String)>,
    session: &mut Socks5Session,
) -> std::io::Result<bool> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;

    // greeting: VER NMETHODS METHODS...
    let mut head = [0u8; 2];
    stream.read_exact(&mut head)?;
    let mut methods = vec![0u8; head[1] as usize];
    stream.read_exact(&mut methods)?;
    session.offered_methods = methods.clone();

    let wanted = if expected.is_some() {
        METHOD_USER_PASS
    } else {
        METHOD_NONE
    };
    if head[0] != VERSION || !methods.contains(&wanted) {
        stream.write_all(&[VERSION, METHOD_UNACCEPTABLE])?;
        return Ok(false);
    }
    stream.write_all(&[VERSION, wanted])?;

    if let Some((user, password)) = expected {
        // sub-negotiation: VER ULEN UNAME PLEN PASSWD
        let mut ver_len = [0u8; 2];
        stream.read_exact(&mut ver_len)?;
        let mut u = vec![0u8; ver_len[1] as usize];
        stream.read_exact(&mut u)?;
        let mut plen = [0u8; 1];
        stream.read_exact(&mut plen)?;
        let mut p = vec![0u8; plen[0] as usize];
        stream.read_exact(&mut p)?;
        let got = (
            String::from_utf8_lossy(&u).into_owned(),
            String::from_utf8_lossy(&p).into_owned(),
        );
        let ok = &got.0 == user && &got.1 == password;
        session.credentials = Some(got);
        stream.write_all(&[0x01, if ok { 0x00 } else { 0x01 }])?;
        if !ok {
            return Ok(false);
        }
    }

    // CONNECT: VER CMD RSV ATYP DST.ADDR DST.PORT
    let mut req = [0u8; 4];
    stream.read_exact(&mut req)?;
    session.address_type = req[3];
    let host = match req[3] {
        0x01 => {
            let mut a = [0u8; 4];
            stream.read_exact(&mut a)?;
            std::net::Ipv4Addr::from(a).to_string()
        }
        0x03 => {
            let mut len = [0u8; 1];
            stream.read_exact(&mut len)?;
            let mut name = vec![0u8; len[0] as usize];
            stream.read_exact(&mut name)?;
            String::from_utf8_lossy(&name).into_owned()
        }
        0x04 => {
            let mut a = [0u8; 16];
            stream.read_exact(&mut a)?;
            std::net::Ipv6Addr::from(a).to_string()
        }
        _ => return Ok(false),
    };
    let mut port = [0u8; 2];
    stream.read_exact(&mut port)?;
    session.target = format!("{}:{}", host, u16::from_be_bytes(port));

    // success, bound to 0.0.0.0:0
    stream.write_all(&[VERSION, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0])?;

    session.request = read_request(stream);
    Ok(session.request.is_some())
}
