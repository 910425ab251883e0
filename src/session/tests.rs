use super::*;
use crate::constants::packet_type;
use crate::protocol::{decode, encode};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

fn password() -> Password {
    Password::new("secret".to_string()).unwrap()
}

fn short_timeout() -> RconTimeout {
    RconTimeout::new(Duration::from_millis(200))
}

fn session_pair() -> (RconSession<DuplexStream>, DuplexStream) {
    let (client, server) = duplex(8192);
    (RconSession::from_stream(client, short_timeout()), server)
}

#[tokio::test]
async fn test_full_exchange() {
    let (mut session, mut server) = session_pair();

    let server_task = tokio::spawn(async move {
        let login = decode(&mut server).await.unwrap();
        assert_eq!(login.request_id, request_id::AUTH);
        assert_eq!(login.packet_type, packet_type::AUTH);
        assert_eq!(login.body, "secret");
        write_packet(
            &mut server,
            &Packet::new(request_id::AUTH, packet_type::AUTH_RESPONSE, ""),
        )
        .await
        .unwrap();

        let command = decode(&mut server).await.unwrap();
        assert_eq!(command.request_id, request_id::COMMAND);
        assert_eq!(command.packet_type, packet_type::EXEC_COMMAND);
        assert_eq!(command.body, "whitelist add Steve123");
        write_packet(
            &mut server,
            &Packet::new(
                request_id::COMMAND,
                packet_type::RESPONSE_VALUE,
                "Added Steve123 to the whitelist",
            ),
        )
        .await
        .unwrap();
    });

    assert_eq!(session.state(), SessionState::Connected);
    session.authenticate(&password()).await.unwrap();
    assert_eq!(session.state(), SessionState::Authenticated);

    let reply = session.execute("whitelist add Steve123").await.unwrap();
    assert_eq!(reply, "Added Steve123 to the whitelist");
    assert_eq!(session.state(), SessionState::Closed);

    server_task.await.unwrap();
}

#[tokio::test]
async fn test_rejected_password() {
    let (mut session, mut server) = session_pair();

    tokio::spawn(async move {
        let _ = decode(&mut server).await;
        write_packet(
            &mut server,
            &Packet::new(request_id::AUTH_REJECTED, packet_type::AUTH_RESPONSE, ""),
        )
        .await
        .unwrap();
        // Keep the pipe open until the client hangs up
        let mut sink = Vec::new();
        let _ = server.read_to_end(&mut sink).await;
    });

    let err = session.authenticate(&password()).await.unwrap_err();
    assert!(matches!(err, SessionError::AuthRejected { request_id: -1 }));
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_auth_reply_type_is_not_checked() {
    let (mut session, mut server) = session_pair();

    tokio::spawn(async move {
        let _ = decode(&mut server).await;
        // Right id, unusual type: still accepted
        write_packet(&mut server, &Packet::new(request_id::AUTH, 99, ""))
            .await
            .unwrap();
        let mut sink = Vec::new();
        let _ = server.read_to_end(&mut sink).await;
    });

    session.authenticate(&password()).await.unwrap();
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_silent_auth_is_auth_failure() {
    let (mut session, _server) = session_pair();

    let err = session.authenticate(&password()).await.unwrap_err();
    assert!(matches!(err, SessionError::AuthTimeout { .. }));
    assert!(err.is_authentication_error());
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_silent_command_is_timeout() {
    let (mut session, mut server) = session_pair();

    tokio::spawn(async move {
        let _ = decode(&mut server).await;
        write_packet(&mut server, &Packet::new(request_id::AUTH, 2, ""))
            .await
            .unwrap();
        // Swallow the command and never answer
        let mut sink = Vec::new();
        let _ = server.read_to_end(&mut sink).await;
    });

    session.authenticate(&password()).await.unwrap();
    let started = std::time::Instant::now();
    let err = session.execute("list").await.unwrap_err();

    assert!(matches!(err, SessionError::CommandTimeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_mismatched_command_id() {
    let (mut session, mut server) = session_pair();

    tokio::spawn(async move {
        let _ = decode(&mut server).await;
        write_packet(&mut server, &Packet::new(request_id::AUTH, 2, ""))
            .await
            .unwrap();
        let _ = decode(&mut server).await;
        write_packet(&mut server, &Packet::new(7, 0, "stale reply"))
            .await
            .unwrap();
    });

    session.authenticate(&password()).await.unwrap();
    let err = session.execute("list").await.unwrap_err();

    match err {
        SessionError::MismatchedId {
            expected,
            actual,
            body,
        } => {
            assert_eq!(expected, request_id::COMMAND);
            assert_eq!(actual, 7);
            assert_eq!(body, "stale reply");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_socket_closed_mid_frame() {
    let (mut session, mut server) = session_pair();

    tokio::spawn(async move {
        let _ = decode(&mut server).await;
        write_packet(&mut server, &Packet::new(request_id::AUTH, 2, ""))
            .await
            .unwrap();
        let _ = decode(&mut server).await;
        // Half a frame, then hang up
        let frame = encode(request_id::COMMAND, 0, "Added Steve");
        server.write_all(&frame[..9]).await.unwrap();
        drop(server);
    });

    session.authenticate(&password()).await.unwrap();
    let err = session.execute("whitelist add Steve").await.unwrap_err();

    assert!(matches!(err, SessionError::Malformed(_)));
    assert_eq!(err.outcome(), crate::whitelist::Outcome::ProtocolError);
}

#[tokio::test]
async fn test_execute_before_auth_is_rejected() {
    let (mut session, _server) = session_pair();

    let err = session.execute("list").await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidState {
            operation: "execute",
            state: SessionState::Connected
        }
    ));
}

#[tokio::test]
async fn test_session_is_single_use() {
    let (mut session, _server) = session_pair();

    session.close().await;
    assert_eq!(session.state(), SessionState::Closed);

    let err = session.authenticate(&password()).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { .. }));
}

#[tokio::test]
async fn test_connect_refused() {
    let port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let host = HostName::new("127.0.0.1".to_string()).unwrap();

    let err = RconSession::connect(&host, Port::try_from(port).unwrap(), short_timeout())
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::ConnectRefused { .. }));
    assert_eq!(err.outcome(), crate::whitelist::Outcome::Unavailable);
}
