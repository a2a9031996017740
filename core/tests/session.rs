// Copyright (c) 2025-2026 The Tapsign Developers

//! Delivery session state machine tests

use tapsign_core::engine::{Delivery, Error, Event, Output, Session, State, TagCapability};
use tapsign_proto::RequestKind;

const FRAME: &str = "proto.pubkey:secp256k1:ripemd160:bech32:m/44'/0'/0'/0/0::";

fn session() -> Session {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());

    let d = Delivery::new(FRAME.to_string(), RequestKind::PublicKey, Some(FRAME.to_string()));
    Session::new(d).unwrap()
}

/// Drive a fresh session up to the provided state
fn advance(s: &mut Session, to: State) {
    let steps = [
        (State::Started, Event::Start),
        (State::TagDetected, Event::TagsDetected(1)),
        (State::Connected, Event::ConnectComplete),
        (State::Writing, Event::Capability(TagCapability::ReadWrite)),
        (State::Delivered, Event::WriteComplete),
    ];

    for (state, evt) in steps {
        if s.state() == to {
            return;
        }
        s.update(&evt).unwrap();
        assert_eq!(s.state(), state);
    }
}

#[test]
fn delivery_happy_path() {
    let mut s = session();

    assert_eq!(s.update(&Event::Start).unwrap(), Output::AwaitTags);
    assert_eq!(s.update(&Event::TagsDetected(1)).unwrap(), Output::Connect);
    assert_eq!(
        s.update(&Event::ConnectComplete).unwrap(),
        Output::QueryCapability
    );

    // Write command carries the framed payload
    let out = s
        .update(&Event::Capability(TagCapability::ReadWrite))
        .unwrap();
    match out {
        Output::Write(r) => assert_eq!(r.payload_str().unwrap(), FRAME),
        _ => panic!("expected write command, got {out:?}"),
    }

    // Write commit ends the session voluntarily with no error
    assert_eq!(
        s.update(&Event::WriteComplete).unwrap(),
        Output::EndSession { error: None }
    );
    assert_eq!(s.state(), State::Delivered);
    assert!(s.delivery().delivered());

    // Invalidation callback completes with the delivery context
    assert_eq!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(Some(FRAME.to_string()))
    );
}

#[test]
fn zero_tags_is_protocol_violation() {
    let mut s = session();
    advance(&mut s, State::Started);

    assert_eq!(
        s.update(&Event::TagsDetected(0)).unwrap(),
        Output::EndSession {
            error: Some(Error::ProtocolViolation)
        }
    );
    assert_eq!(s.state(), State::Failed(Error::ProtocolViolation));
}

#[test]
fn multiple_tags_is_protocol_violation() {
    let mut s = session();
    advance(&mut s, State::Started);

    s.update(&Event::TagsDetected(2)).unwrap();
    assert_eq!(s.state(), State::Failed(Error::ProtocolViolation));

    // Failure still completes with no result on session end
    assert_eq!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(None)
    );
    assert!(!s.delivery().delivered());
}

#[test]
fn connect_failure() {
    let mut s = session();
    advance(&mut s, State::TagDetected);

    assert_eq!(
        s.update(&Event::ConnectFailed).unwrap(),
        Output::EndSession {
            error: Some(Error::ConnectionError)
        }
    );
    assert_eq!(s.state(), State::Failed(Error::ConnectionError));
}

#[test]
fn capability_failures() {
    for (cap, err) in [
        (TagCapability::NotSupported, Error::Unsupported),
        (TagCapability::ReadOnly, Error::ReadOnlyTarget),
        (TagCapability::Unknown, Error::UnknownCapability),
    ] {
        let mut s = session();
        advance(&mut s, State::Connected);

        assert_eq!(
            s.update(&Event::Capability(cap)).unwrap(),
            Output::EndSession { error: Some(err) }
        );
        assert_eq!(s.state(), State::Failed(err));
    }
}

#[test]
fn write_failure() {
    let mut s = session();
    advance(&mut s, State::Writing);

    s.update(&Event::WriteFailed).unwrap();
    assert_eq!(s.state(), State::Failed(Error::WriteError));
    assert!(!s.delivery().delivered());

    assert_eq!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(None)
    );
}

#[test]
fn cancellation_from_every_active_state() {
    for to in [
        State::Started,
        State::TagDetected,
        State::Connected,
        State::Writing,
    ] {
        let mut s = session();
        advance(&mut s, to);

        // External invalidation before the write commits
        assert_eq!(
            s.update(&Event::SessionEnded).unwrap(),
            Output::Complete(None),
            "cancel from {to}"
        );
        assert_eq!(s.state(), State::Cancelled);
        assert!(!s.delivery().delivered());
    }
}

#[test]
fn completion_only_at_session_end() {
    let mut s = session();

    // No transition up to the write commit emits a completion
    for evt in [
        Event::Start,
        Event::TagsDetected(1),
        Event::ConnectComplete,
        Event::Capability(TagCapability::ReadWrite),
        Event::WriteComplete,
    ] {
        let out = s.update(&evt).unwrap();
        assert!(!matches!(out, Output::Complete(_)), "early completion on {evt:?}");
    }

    assert!(matches!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(Some(_))
    ));
}

#[test]
fn out_of_order_events_rejected() {
    let mut s = session();

    // Not started yet
    assert_eq!(s.update(&Event::TagsDetected(1)), Err(Error::UnexpectedEvent));
    assert_eq!(s.update(&Event::WriteComplete), Err(Error::UnexpectedEvent));
    assert_eq!(s.state(), State::Idle);

    // Wrong phase
    advance(&mut s, State::Started);
    assert_eq!(s.update(&Event::Start), Err(Error::UnexpectedEvent));
    assert_eq!(s.update(&Event::WriteComplete), Err(Error::UnexpectedEvent));
    assert_eq!(s.state(), State::Started);
}

#[test]
fn terminal_states_are_dead() {
    let mut s = session();
    advance(&mut s, State::Delivered);
    assert_eq!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(Some(FRAME.to_string()))
    );

    // A finished session cannot be restarted or re-completed
    assert_eq!(s.update(&Event::Start), Err(Error::UnexpectedEvent));
    assert_eq!(s.update(&Event::SessionEnded), Err(Error::UnexpectedEvent));

    // Failed sessions complete once as well
    let mut s = session();
    advance(&mut s, State::Started);
    s.update(&Event::TagsDetected(0)).unwrap();
    assert_eq!(
        s.update(&Event::SessionEnded).unwrap(),
        Output::Complete(None)
    );
    assert_eq!(s.update(&Event::SessionEnded), Err(Error::UnexpectedEvent));

    let mut s = session();
    advance(&mut s, State::Started);
    s.update(&Event::SessionEnded).unwrap();
    assert_eq!(s.state(), State::Cancelled);
    assert_eq!(s.update(&Event::SessionEnded), Err(Error::UnexpectedEvent));
}

#[test]
fn oversize_payload_rejected_up_front() {
    let d = Delivery::new("x".repeat(300), RequestKind::Sign, None);
    assert_eq!(Session::new(d).err(), Some(Error::PayloadOverflow(300)));
}
