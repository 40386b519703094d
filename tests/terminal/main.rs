mod mock;

use mock::*;
use rand::Rng;
use termsite::settings::{
    BEEP_KEY, EFFECTS_KEY, MemorySettings, PersistentSettings, SettingsStore,
};
use termsite::storage::RamStorage;
use termsite::terminal::commands::info::ONLINE_SINCE_MS;
use termsite::terminal::commands::{self, SPACER};
use termsite::terminal::{
    BufferSurface, Command, CommandError, Context, EMPTY_THRESHOLD, Key, KeyResponse, Outcome,
    Registry, Session, SessionConfig, builtin_registry,
};

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn test_every_builtin_resolves() {
        let registry = builtin_registry();
        for name in ["HELP", "INFO", "CLS", "AUDIO", "BASE64"] {
            assert_eq!(registry.lookup(name).map(|c| c.name), Some(name));
        }
        assert!(registry.lookup("bogus").is_none());
        assert!(registry.lookup("help").is_none());
    }

    #[test]
    fn test_unrecognized_command() {
        let mut session = session();
        let outcome = session.submit("FOO bar");

        assert_eq!(outcome, Outcome::NotRecognized);
        assert!(screen(&session).contains(
            "<div>'FOO' is not recognized as an internal or external command,</div>"
        ));
        assert!(screen(&session).contains("operable program or batch file."));
        assert_eq!(session.history().get(0), Some("FOO bar"));
    }

    #[test]
    fn test_submitted_line_is_echoed_and_escaped() {
        let mut session = session();
        session.submit("<b>hi</b>");

        let screen = screen(&session);
        assert!(screen.contains(r#"<div class="cmd_input">&lt;b&gt;hi&lt;/b&gt;</div>"#));
        assert!(screen.contains("'&lt;b&gt;hi&lt;/b&gt;' is not recognized"));
        assert!(!screen.contains("<b>hi</b>"));
    }

    #[test]
    fn test_input_rearmed_after_every_submission() {
        let mut session = session();
        assert_eq!(session.surface().rearms(), 1);

        session.submit("HELP");
        session.submit("");
        assert_eq!(session.surface().rearms(), 3);
    }

    #[test]
    fn test_lookup_is_case_sensitive_on_leading_token() {
        let mut session = session();
        assert_eq!(session.submit("help"), Outcome::NotRecognized);
        assert_eq!(session.submit("HELP extra words"), Outcome::Executed("HELP"));
        // Leading space makes the command token empty
        assert_eq!(session.submit(" HELP"), Outcome::NotRecognized);
    }

    #[test]
    fn test_command_can_chain_through_registry() {
        fn alias(ctx: &mut Context<'_>, line: &str) -> Result<(), CommandError> {
            let help = ctx.registry.lookup("HELP").copied();
            match help {
                Some(help) => help.run(ctx, line),
                None => Err(CommandError::MissingInput),
            }
        }

        let mut registry = builtin_registry();
        registry
            .register(Command {
                name: "?",
                description: "Shortcut for HELP",
                usage: None,
                hidden: true,
                handler: alias,
            })
            .unwrap();

        let mut session = Session::with_registry(
            registry,
            SessionConfig::default(),
            BufferSurface::new(),
            MemorySettings::new(),
            MockPlatform::default(),
        );

        assert_eq!(session.submit("?"), Outcome::Executed("?"));
        assert!(screen(&session).contains("Available commands:"));
    }
}

#[cfg(test)]
mod idle {
    use super::*;

    #[test]
    fn test_tenth_empty_submission_replaces_screen() {
        let mut session = session();
        session.submit("HELP");
        assert!(screen(&session).contains("Available commands:"));

        for i in 1..EMPTY_THRESHOLD {
            assert_eq!(session.submit(""), Outcome::NotRecognized);
            assert_eq!(session.empty_count(), i);
        }
        assert_eq!(session.submit(""), Outcome::Idle);
        assert_eq!(session.empty_count(), 0);

        let screen = screen(&session);
        assert!(!screen.contains("Available commands:"));
        assert!(screen.contains("Ten empty lines in a row."));
    }

    #[test]
    fn test_eleventh_empty_submission_starts_fresh_count() {
        let mut session = session();
        for _ in 0..EMPTY_THRESHOLD {
            session.submit("");
        }
        assert_eq!(session.empty_count(), 0);

        assert_eq!(session.submit(""), Outcome::NotRecognized);
        assert_eq!(session.empty_count(), 1);
    }

    #[test]
    fn test_empty_lines_never_enter_history() {
        let mut session = session();
        session.submit("");
        session.submit("INFO");
        session.submit("");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_commands_do_not_reset_count() {
        let mut session = session();
        for _ in 0..5 {
            session.submit("");
        }
        session.submit("HELP");
        assert_eq!(session.empty_count(), 5);
    }

    #[test]
    fn test_zero_threshold_disables_payload() {
        let config = SessionConfig {
            empty_threshold: 0,
            ..SessionConfig::default()
        };
        let mut session = Session::with_registry(
            builtin_registry(),
            config,
            BufferSurface::new(),
            MemorySettings::new(),
            MockPlatform::default(),
        );
        for _ in 0..(EMPTY_THRESHOLD * 2) {
            assert_eq!(session.submit(""), Outcome::NotRecognized);
        }
    }

    #[test]
    fn test_custom_payload() {
        let config = SessionConfig {
            empty_threshold: 2,
            // "ok" in UTF-16LE
            idle_payload: "bwBrAA==",
            ..SessionConfig::default()
        };
        let mut session = Session::with_registry(
            Registry::new(),
            config,
            BufferSurface::new(),
            MemorySettings::new(),
            MockPlatform::default(),
        );
        session.submit("");
        assert_eq!(session.submit(""), Outcome::Idle);
        assert_eq!(session.surface().contents(), "ok");
    }
}

#[cfg(test)]
mod history {
    use super::*;

    #[test]
    fn test_recall_previous_after_first_submission() {
        let mut session = session();
        session.submit("INFO");
        assert_eq!(session.handle_key(Key::ArrowUp), KeyResponse::Recall("INFO"));
    }

    #[test]
    fn test_recall_wraps_after_len_calls() {
        let mut session = session();
        for line in ["HELP", "INFO", "CLS"] {
            session.submit(line);
        }

        let first = match session.handle_key(Key::ArrowUp) {
            KeyResponse::Recall(line) => line.to_string(),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(first, "CLS");
        session.handle_key(Key::ArrowUp);
        session.handle_key(Key::ArrowUp);
        assert_eq!(
            session.handle_key(Key::ArrowUp),
            KeyResponse::Recall(first.as_str())
        );
    }

    #[test]
    fn test_arrow_down_and_other_keys() {
        let mut session = session();
        assert_eq!(session.handle_key(Key::ArrowDown), KeyResponse::Recall(""));
        session.submit("HELP");
        session.submit("INFO");
        assert_eq!(session.handle_key(Key::ArrowDown), KeyResponse::Recall("INFO"));
        assert_eq!(session.handle_key(Key::ArrowDown), KeyResponse::Recall("HELP"));
        assert_eq!(session.handle_key(Key::Other), KeyResponse::Ignored);
    }

    #[test]
    fn test_submission_resets_cursor() {
        let mut session = session();
        session.submit("HELP");
        session.submit("INFO");
        session.handle_key(Key::ArrowUp);
        session.handle_key(Key::ArrowUp);
        assert_eq!(session.history().cursor(), 0);

        session.handle_key(Key::Enter("CLS"));
        assert_eq!(session.history().cursor(), 0);
        assert_eq!(session.handle_key(Key::ArrowUp), KeyResponse::Recall("CLS"));
    }

    #[test]
    fn test_randomized_wrap_law() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut session = session();
            let len = rng.gen_range(1..12);
            for i in 0..len {
                session.submit(&format!("LINE{}", i));
            }

            let first = match session.handle_key(Key::ArrowUp) {
                KeyResponse::Recall(line) => line.to_string(),
                other => panic!("unexpected {:?}", other),
            };
            assert_eq!(first, format!("LINE{}", len - 1));
            for _ in 1..len {
                session.handle_key(Key::ArrowUp);
            }
            assert_eq!(
                session.handle_key(Key::ArrowUp),
                KeyResponse::Recall(first.as_str())
            );
        }
    }
}

#[cfg(test)]
mod builtins {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let mut session = session();
        assert_eq!(
            session.submit("BASE64 ENCODE hello world"),
            Outcome::Executed("BASE64")
        );
        assert!(screen(&session).contains("<div>aGVsbG8gd29ybGQ=</div>"));

        session.submit("BASE64 DECODE aGVsbG8gd29ybGQ=");
        assert!(screen(&session).contains("<div>hello world</div>"));
    }

    #[test]
    fn test_base64_decode_unpadded() {
        let mut session = session();
        assert_eq!(
            session.submit("BASE64 DECODE aGk"),
            Outcome::Executed("BASE64")
        );
        assert!(screen(&session).ends_with("<div>hi</div>"));
        assert!(!screen(&session).contains("Invalid base64 input"));
    }

    #[test]
    fn test_base64_keeps_inner_spacing() {
        let mut session = session();
        session.submit("BASE64 ENCODE a  b");
        // "a  b"
        assert!(screen(&session).contains("<div>YSAgYg==</div>"));
    }

    #[test]
    fn test_base64_missing_input() {
        let mut session = session();
        let outcome = session.submit("BASE64 ENCODE");

        assert_eq!(
            outcome,
            Outcome::Rejected("BASE64", CommandError::MissingInput)
        );
        assert!(screen(&session).contains("<div>Missing input</div>"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().get(0), Some("BASE64 ENCODE"));
    }

    #[test]
    fn test_base64_invalid_action() {
        let mut session = session();
        let outcome = session.submit("BASE64 ROT13 hi");
        assert!(matches!(
            outcome,
            Outcome::Rejected("BASE64", CommandError::InvalidArgument { .. })
        ));
        assert!(screen(&session).contains("Invalid arg, please use ENCODE and DECODE only"));

        session.submit("BASE64");
        assert_eq!(
            screen(&session)
                .matches("Invalid arg, please use ENCODE and DECODE only")
                .count(),
            2
        );
    }

    #[test]
    fn test_base64_malformed_input() {
        let mut session = session();
        assert_eq!(
            session.submit("BASE64 DECODE %%%"),
            Outcome::Rejected("BASE64", CommandError::MalformedInput)
        );
        assert!(screen(&session).contains("Invalid base64 input"));
    }

    #[test]
    fn test_base64_output_is_escaped() {
        let mut session = session();
        // "<i>" encoded
        session.submit("BASE64 DECODE PGk+");
        assert!(screen(&session).contains("<div>&lt;i&gt;</div>"));
    }

    #[test]
    fn test_help_lists_visible_commands() {
        fn secret(_ctx: &mut Context<'_>, _line: &str) -> Result<(), CommandError> {
            Ok(())
        }

        let mut registry = builtin_registry();
        registry
            .register(Command {
                name: "SECRET",
                description: "Hidden command",
                usage: None,
                hidden: true,
                handler: secret,
            })
            .unwrap();
        let mut session = Session::with_registry(
            registry,
            SessionConfig::default(),
            BufferSurface::new(),
            MemorySettings::new(),
            MockPlatform::default(),
        );

        session.submit("HELP");
        let screen = screen(&session);
        assert!(screen.contains(r#"<div style="">Available commands:</div>"#));
        assert!(screen.contains(r#"<div style="">BASE64</div>"#));
        assert!(screen.contains(
            r#"<div style="padding-left: 40px">Usage: BASE64 [ENCODE or DECODE] [string]</div>"#
        ));
        assert!(screen.contains(
            r#"<div style="padding-left: 40px">Description: Enable or disable audio</div>"#
        ));
        assert!(!screen.contains("SECRET"));
        // HELP has no usage line
        assert!(!screen.contains("Usage: HELP"));
        assert!(screen.contains(SPACER));

        assert_eq!(session.submit("SECRET"), Outcome::Executed("SECRET"));
    }

    #[test]
    fn test_help_follows_registration_order() {
        let mut session = session();
        session.submit("HELP");
        let screen = screen(&session);

        let positions: Vec<usize> = commands::BUILTINS
            .iter()
            .map(|c| {
                screen
                    .find(&format!(r#"<div style="">{}</div>"#, c.name))
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_info_durations() {
        let mut session = Session::new(
            BufferSurface::new(),
            MemorySettings::new(),
            MockPlatform::at(ONLINE_SINCE_MS + 1_337_000_000),
        );
        assert_eq!(session.submit("INFO"), Outcome::Executed("INFO"));

        let screen = screen(&session);
        assert!(screen.contains("<pre>"));
        assert!(screen.contains("| Online: 15d 11h 23m 20s"));
        // The clock is before the experience epoch, so that duration clamps
        assert!(screen.contains("| Years of Experience: 0ms"));
        assert!(screen.contains(r#"<a href="https://github.com/RainyXeon/ByteBlaze" target="_blank">ByteBlaze</a>"#));
    }

    #[test]
    fn test_cls_clears_screen() {
        let mut session = session();
        session.submit("HELP");
        assert_eq!(session.submit("CLS"), Outcome::Executed("CLS"));
        assert_eq!(screen(&session), "");
    }
}

#[cfg(test)]
mod settings {
    use super::*;

    #[test]
    fn test_first_submission_beeps_and_stores_default() {
        let mut session = session();
        session.submit("HELP");
        assert_eq!(session.platform().beeps, 1);
        assert_eq!(session.settings().get(BEEP_KEY), Some("yes"));

        session.submit("");
        assert_eq!(session.platform().beeps, 2);
    }

    #[test]
    fn test_audio_disable_silences_later_submissions() {
        let mut session = session();
        assert_eq!(session.submit("AUDIO DISABLE"), Outcome::Executed("AUDIO"));
        assert_eq!(session.settings().get(BEEP_KEY), Some("no"));
        let beeps = session.platform().beeps;

        session.submit("HELP");
        session.submit("INFO");
        assert_eq!(session.platform().beeps, beeps);
    }

    #[test]
    fn test_audio_enable_beeps_once() {
        let mut settings = MemorySettings::new();
        settings.set(BEEP_KEY, "no").unwrap();
        let mut session = Session::new(BufferSurface::new(), settings, MockPlatform::default());

        assert_eq!(session.submit("AUDIO ENABLE"), Outcome::Executed("AUDIO"));
        assert_eq!(session.settings().get(BEEP_KEY), Some("yes"));
        assert_eq!(session.platform().beeps, 1);
    }

    #[test]
    fn test_audio_invalid_argument() {
        let mut session = session();
        let outcome = session.submit("AUDIO LOUD");
        assert!(matches!(
            outcome,
            Outcome::Rejected("AUDIO", CommandError::InvalidArgument { .. })
        ));
        assert!(screen(&session).contains("<div>Invalid arg, please use ENABLE and DISABLE only</div>"));
    }

    #[test]
    fn test_effects_read_at_start() {
        let mut settings = MemorySettings::new();
        settings.set(EFFECTS_KEY, "no").unwrap();
        let session = Session::new(BufferSurface::new(), settings, MockPlatform::default());
        assert!(!session.effects().enabled());

        let session = mock::session();
        assert!(session.effects().enabled());
        assert_eq!(session.settings().get(EFFECTS_KEY), Some("yes"));
    }

    #[test]
    fn test_audio_setting_persists_across_sessions() {
        let settings = PersistentSettings::open(RamStorage::<1024>::new());
        let mut session = Session::new(BufferSurface::new(), settings, MockPlatform::default());
        session.submit("AUDIO DISABLE");

        let (_, settings, _) = session.into_parts();
        let reopened = PersistentSettings::open(settings.into_storage());
        assert_eq!(reopened.get(BEEP_KEY), Some("no"));
        assert_eq!(reopened.get(EFFECTS_KEY), Some("yes"));

        let mut session = Session::new(BufferSurface::new(), reopened, MockPlatform::default());
        session.submit("HELP");
        assert_eq!(session.platform().beeps, 0);
    }
}
