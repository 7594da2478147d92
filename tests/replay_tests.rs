#[cfg(test)]
mod tests {
    use mcreplay::error::Error;
    use mcreplay::record::{record, CallLogger, ProxyTree};
    use mcreplay::replay::{ensure_match, ReplayConnection};
    use mcreplay::scripts;
    use mcreplay::target::CallTarget;
    use mcreplay::transcript::{Kwargs, LogEntry, MethodPath, Transcript, Value};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    const WORLD_NAMES: &[&str] = &["postToChat", "player.getPos", "camera.setPos"];

    /// Live-like world stub: chat and camera return nothing, the
    /// player sits at the origin.
    struct StubWorld;

    impl CallTarget for StubWorld {
        fn call(
            &mut self,
            method: &MethodPath,
            _args: &[Value],
            _kwargs: &Kwargs,
        ) -> Result<Value, Error> {
            match method.dotted().as_str() {
                "postToChat" | "camera.setPos" => Ok(Value::Unit),
                "player.getPos" => Ok(Value::Seq(vec![
                    Value::Float(0.0),
                    Value::Float(0.0),
                    Value::Float(0.0),
                ])),
                other => Err(Error::UnknownMethod {
                    target: "stub-world".to_string(),
                    name: other.to_string(),
                }),
            }
        }

        fn has_method(&self, method: &MethodPath) -> bool {
            WORLD_NAMES.contains(&method.dotted().as_str())
        }
    }

    /// Live-like transport stub answering queries from canned replies.
    struct StubConn {
        replies: VecDeque<String>,
    }

    impl StubConn {
        fn new(replies: &[&str]) -> Self {
            StubConn {
                replies: replies.iter().map(|r| r.to_string()).collect(),
            }
        }
    }

    impl CallTarget for StubConn {
        fn call(
            &mut self,
            method: &MethodPath,
            _args: &[Value],
            _kwargs: &Kwargs,
        ) -> Result<Value, Error> {
            match method.leaf() {
                "drain" | "send" => Ok(Value::Unit),
                "receive" | "sendReceive" => Ok(Value::Str(
                    self.replies.pop_front().expect("no canned reply left"),
                )),
                other => Err(Error::UnknownMethod {
                    target: "stub-conn".to_string(),
                    name: other.to_string(),
                }),
            }
        }

        fn has_method(&self, method: &MethodPath) -> bool {
            method.segments().len() == 1
                && ["drain", "send", "receive", "sendReceive"].contains(&method.leaf())
        }
    }

    fn enter(key: &str, name: &str, args: Vec<Value>) -> LogEntry {
        LogEntry::Enter {
            key: key.to_string(),
            name: name.to_string(),
            args,
            kwargs: Kwargs::new(),
        }
    }

    fn exit(key: &str, name: &str, result: Value) -> LogEntry {
        LogEntry::Exit {
            key: key.to_string(),
            name: name.to_string(),
            result,
        }
    }

    fn origin() -> Value {
        Value::Seq(vec![
            Value::Float(0.0),
            Value::Float(0.0),
            Value::Float(0.0),
        ])
    }

    /// The concrete scenario: chat, position query, camera move
    /// against a world-level stub produces exactly six entries, and a
    /// dummy seeded with them reproduces the transcript.
    #[test]
    fn concrete_scenario_records_and_replays_exactly() {
        let log = Transcript::new();
        let logger = CallLogger::new(log.clone());
        let world: Rc<RefCell<dyn CallTarget>> = Rc::new(RefCell::new(StubWorld));
        let mut proxy = ProxyTree::wrap(&logger, world, "world", WORLD_NAMES).unwrap();

        scripts::chat_and_camera(&mut proxy).unwrap();

        let expected = vec![
            enter("world", "postToChat", vec![Value::from("hi")]),
            exit("world", "postToChat", Value::Unit),
            enter("world", "player.getPos", vec![]),
            exit("world", "player.getPos", origin()),
            enter(
                "world",
                "camera.setPos",
                vec![Value::Int(36), Value::Int(40), Value::Int(14)],
            ),
            exit("world", "camera.setPos", Value::Unit),
        ];
        assert_eq!(log.snapshot(), expected);

        // replay the same script against a dummy seeded with this log
        let live = Transcript::new();
        let replay_logger = CallLogger::new(live.clone());
        let dummy: Rc<RefCell<dyn CallTarget>> = Rc::new(RefCell::new(
            ReplayConnection::with_key(expected.clone(), "world"),
        ));
        let mut replay_proxy =
            ProxyTree::wrap(&replay_logger, dummy, "world", WORLD_NAMES).unwrap();

        scripts::chat_and_camera(&mut replay_proxy).unwrap();
        assert_eq!(live.snapshot(), expected);
    }

    #[test]
    fn two_level_recording_interleaves_conn_and_world() {
        let log = Transcript::new();
        let conn = StubConn::new(&["0.0,0.0,0.0"]);
        record(&log, scripts::chat_and_camera, Rc::new(RefCell::new(conn))).unwrap();

        let entries = log.snapshot();
        assert_eq!(entries.len(), 12);

        // first call: world Enter, nested conn Enter/Exit, world Exit
        assert_eq!(
            entries[0],
            enter("world", "postToChat", vec![Value::from("hi")])
        );
        assert_eq!(
            entries[1],
            enter("conn", "send", vec![Value::from("chat.post(hi)")])
        );
        assert_eq!(entries[2], exit("conn", "send", Value::Unit));
        assert_eq!(entries[3], exit("world", "postToChat", Value::Unit));

        // the position query goes through sendReceive
        assert_eq!(
            entries[5],
            enter(
                "conn",
                "sendReceive",
                vec![Value::from("player.getPos()")]
            )
        );
        assert_eq!(
            entries[6],
            exit("conn", "sendReceive", Value::from("0.0,0.0,0.0"))
        );
        assert_eq!(entries[7], exit("world", "player.getPos", origin()));
    }

    #[test]
    fn replay_reproduces_a_two_level_recording() {
        let log = Transcript::new();
        let conn = StubConn::new(&["0.0,0.0,0.0"]);
        record(&log, scripts::chat_and_camera, Rc::new(RefCell::new(conn))).unwrap();

        let live = Transcript::new();
        let dummy = ReplayConnection::new(log.snapshot());
        record(&live, scripts::chat_and_camera, Rc::new(RefCell::new(dummy))).unwrap();

        assert_eq!(live, log);
        assert!(ensure_match(&log.snapshot(), &live.snapshot()).is_ok());
    }

    #[test]
    fn truncated_recording_exhausts_the_dummy() {
        let log = Transcript::new();
        let conn = StubConn::new(&["0.0,0.0,0.0"]);
        record(&log, scripts::chat_and_camera, Rc::new(RefCell::new(conn))).unwrap();

        // keep only the first call's entries; the script makes three
        let truncated: Vec<LogEntry> = log.snapshot().into_iter().take(4).collect();

        let live = Transcript::new();
        let dummy = ReplayConnection::new(truncated);
        let err = record(&live, scripts::chat_and_camera, Rc::new(RefCell::new(dummy)))
            .unwrap_err();
        assert!(matches!(err, Error::TranscriptExhausted { .. }));
    }

    #[test]
    fn tampered_recording_shows_up_as_divergence() {
        let log = Transcript::new();
        let conn = StubConn::new(&["0.0,0.0,0.0"]);
        record(&log, scripts::chat_and_camera, Rc::new(RefCell::new(conn))).unwrap();

        // change the recorded position reply
        let mut tampered = log.snapshot();
        tampered[6] = exit("conn", "sendReceive", Value::from("1.0,2.0,3.0"));

        let live = Transcript::new();
        let dummy = ReplayConnection::new(tampered);
        record(&live, scripts::chat_and_camera, Rc::new(RefCell::new(dummy))).unwrap();

        let err = ensure_match(&log.snapshot(), &live.snapshot()).unwrap_err();
        match err {
            Error::ReplayDivergence { index, .. } => assert_eq!(index, 6),
            other => panic!("expected ReplayDivergence, got {:?}", other),
        }
    }
}
