//! FTP reply parsing
//!
//! Decodes reply lines into [`ServerResponse`] values and PASV replies
//! into connectable [`DataEndpoint`]s.

use crate::error::ParseError;
use crate::protocol::responses::{DataEndpoint, ServerResponse};

/// Split a reply at its first space into a numeric code and the message.
///
/// The message is kept verbatim, including anything after further spaces.
/// A non-numeric code fails instead of defaulting to zero.
pub fn parse_response(raw: &str) -> Result<ServerResponse, ParseError> {
    let (code, message) = raw
        .split_once(' ')
        .ok_or_else(|| ParseError::MalformedResponse(raw.to_string()))?;
    let code = code
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidReplyCode(code.to_string()))?;
    Ok(ServerResponse::new(code, message))
}

/// Returns the terminating prefix (e.g. `"220 "`) when `line` opens a
/// multi-line reply such as `220-Welcome`.
pub fn multiline_terminator(line: &str) -> Option<String> {
    let bytes = line.as_bytes();
    if bytes.len() >= 4 && bytes[..3].iter().all(u8::is_ascii_digit) && bytes[3] == b'-' {
        Some(format!("{} ", &line[..3]))
    } else {
        None
    }
}

/// Decode `(h1,h2,h3,h4,p1,p2)` from a PASV reply.
///
/// The last `(` before the last `)` delimits the octet list, since servers
/// are free to put other parentheses in the text.
pub fn parse_pasv(message: &str) -> Result<DataEndpoint, ParseError> {
    let malformed = || ParseError::MalformedPasvReply(message.to_string());

    let close = message.rfind(')').ok_or_else(malformed)?;
    let open = message[..close].rfind('(').ok_or_else(malformed)?;

    let fields = message[open + 1..close]
        .split(',')
        .map(|token| token.trim().parse::<u16>())
        .collect::<Result<Vec<u16>, _>>()
        .map_err(|_| malformed())?;
    let [h1, h2, h3, h4, p1, p2] = <[u16; 6]>::try_from(fields.as_slice()).map_err(|_| malformed())?;

    if [h1, h2, h3, h4].iter().any(|octet| *octet > 255) {
        return Err(malformed());
    }
    let port = u16::try_from(u32::from(p1) * 256 + u32::from(p2)).map_err(|_| malformed())?;

    Ok(DataEndpoint {
        host: format!("{}.{}.{}.{}", h1, h2, h3, h4),
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_response() {
        let response = parse_response("230 User logged in, proceed").unwrap();
        assert_eq!(response.code, 230);
        assert_eq!(response.message, "User logged in, proceed");
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let response = parse_response("220 Ready \r\n").unwrap();
        assert_eq!(response.code, 220);
        assert_eq!(response.message, "Ready \r\n");

        let response = parse_response("200 ").unwrap();
        assert_eq!(response.message, "");
    }

    #[test]
    fn test_response_without_space_is_malformed() {
        assert_eq!(
            parse_response("226"),
            Err(ParseError::MalformedResponse("226".into()))
        );
        assert!(parse_response("").is_err());
        assert!(parse_response("220-Welcome").is_err());
    }

    #[test]
    fn test_non_numeric_code_fails_fast() {
        assert_eq!(
            parse_response("abc hello"),
            Err(ParseError::InvalidReplyCode("abc".into()))
        );
    }

    #[test]
    fn test_multiline_terminator() {
        assert_eq!(multiline_terminator("220-Welcome"), Some("220 ".to_string()));
        assert_eq!(multiline_terminator("220 Welcome"), None);
        assert_eq!(multiline_terminator("ab-c"), None);
        assert_eq!(multiline_terminator("22"), None);
    }

    #[test]
    fn test_parse_pasv_reply() {
        let endpoint = parse_pasv("227 Entering (192,168,1,10,200,5)").unwrap();
        assert_eq!(endpoint.host, "192.168.1.10");
        assert_eq!(endpoint.port, 51205);
    }

    #[test]
    fn test_parse_pasv_uses_last_parenthesized_group() {
        let endpoint =
            parse_pasv("Entering Passive Mode (see docs) (10,0,0,1,4,1).").unwrap();
        assert_eq!(endpoint.host, "10.0.0.1");
        assert_eq!(endpoint.port, 1025);

        let endpoint = parse_pasv("Entering Passive Mode ( 127, 0, 0, 1, 0, 21 )").unwrap();
        assert_eq!(endpoint.host, "127.0.0.1");
        assert_eq!(endpoint.port, 21);
    }

    #[test]
    fn test_parse_pasv_rejects_wrong_octet_count() {
        assert!(parse_pasv("Entering (192,168,1,10,200)").is_err());
        assert!(parse_pasv("Entering (192,168,1,10,200,5,7)").is_err());
        assert!(parse_pasv("Entering ()").is_err());
    }

    #[test]
    fn test_parse_pasv_rejects_missing_delimiters() {
        assert!(parse_pasv("Entering 192,168,1,10,200,5").is_err());
        assert!(parse_pasv("Entering (192,168,1,10,200,5").is_err());
        assert!(parse_pasv("Entering 192,168,1,10,200,5)").is_err());
        assert!(parse_pasv(") (").is_err());
    }

    #[test]
    fn test_parse_pasv_rejects_out_of_range_values() {
        assert!(parse_pasv("(256,0,0,1,4,1)").is_err());
        assert!(parse_pasv("(10,0,0,1,256,0)").is_err());
        assert!(parse_pasv("(10,0,0,1,x,1)").is_err());
        assert_eq!(parse_pasv("(10,0,0,1,255,255)").unwrap().port, 65535);
    }
}
