use approx::relative_eq;
use proptest::prelude::*;
use spn_player::notation::{parse, parse_resolved, PitchClass};
use spn_player::schedule::{build_schedule, build_session, Adsr, Voice, Waveform};

/// One valid unit: a note or rest with an optionally dotted denominator.
fn unit() -> impl Strategy<Value = String> {
    let pitch = prop_oneof![
        1 => Just("_".to_string()),
        6 => (0..12usize, 0..=8i32)
            .prop_map(|(class, octave)| format!("{}{}", PitchClass::ALL[class].name(), octave)),
    ];
    let denominator = prop::sample::select(vec![1u64, 2, 3, 4, 6, 8, 12, 16, 32]);
    (pitch, denominator, any::<bool>())
        .prop_map(|(p, d, dot)| format!("{p}/{d}{}", if dot { "." } else { "" }))
}

fn notation() -> impl Strategy<Value = String> {
    prop::collection::vec(unit(), 1..24).prop_map(|units| units.join(" "))
}

fn adsr() -> impl Strategy<Value = Adsr> {
    (0.0..1.0f64, 0.0..1.0f64, 0.0..=1.0f64, 0.0..1.0f64)
        .prop_map(|(a, d, s, r)| Adsr::new(a, d, s, r))
}

proptest! {
    #[test]
    fn frequency_follows_equal_temperament(class in 0..12usize, octave in 0..=8i32) {
        let pitch = PitchClass::ALL[class];
        let token = format!("{}{}/4", pitch.name(), octave);
        let note = parse_resolved(&token).unwrap()[0];

        let n = pitch.distance_from_reference(octave) as f64;
        let exact = 440.0 * 2f64.powf(n / 12.0);
        let hz = note.frequency_hz.unwrap();
        prop_assert!((hz - exact).abs() <= 0.005 + 1e-9, "{token}: {hz} vs {exact}");
    }

    #[test]
    fn scheduling_is_pure(text in notation(), bpm in 10.0..300.0f64, adsr in adsr()) {
        let notes = parse_resolved(&text).unwrap();
        let a = build_schedule(&notes, bpm, &adsr, Waveform::Sine).unwrap();
        let b = build_schedule(&notes, bpm, &adsr, Waveform::Sine).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn entries_are_in_time_order(text in notation(), bpm in 10.0..300.0f64, adsr in adsr()) {
        let tokens = parse(&text).unwrap();
        let schedule = build_schedule(&tokens, bpm, &adsr, Waveform::Sine).unwrap();

        let notes = tokens.iter().filter(|t| !t.is_rest()).count();
        prop_assert_eq!(schedule.entries.len(), notes);

        for pair in schedule.entries.windows(2) {
            prop_assert!(pair[0].start_time <= pair[1].start_time);
            prop_assert!(pair[0].stop_time <= pair[1].start_time + 1e-9);
        }
        for entry in &schedule.entries {
            let times: Vec<f64> = entry.envelope.breakpoints().iter().map(|p| p.time).collect();
            prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(entry.finish_time() <= schedule.finish_time);
        }
    }

    #[test]
    fn session_finishes_with_its_longest_voice(
        texts in prop::collection::vec(notation(), 0..5),
        bpm in 10.0..300.0f64,
    ) {
        let voices: Vec<Voice> = texts.iter().map(|t| Voice::new(t.as_str()).bpm(bpm)).collect();
        let session = build_session(&voices).unwrap();

        let expected = voices
            .iter()
            .map(|v| v.schedule().unwrap().finish_time)
            .fold(0.0, f64::max);
        prop_assert_eq!(session.finish_time, expected);
    }

    #[test]
    fn doubling_tempo_halves_times(text in notation(), bpm in 10.0..150.0f64, adsr in adsr()) {
        let notes = parse_resolved(&text).unwrap();
        let slow = build_schedule(&notes, bpm, &adsr, Waveform::Sine).unwrap();
        let fast = build_schedule(&notes, bpm * 2.0, &adsr, Waveform::Sine).unwrap();

        prop_assert!(relative_eq!(fast.finish_time * 2.0, slow.finish_time, max_relative = 1e-9));
        for (s, f) in slow.entries.iter().zip(&fast.entries) {
            prop_assert!(relative_eq!(f.start_time * 2.0, s.start_time, epsilon = 1e-9, max_relative = 1e-9));
            prop_assert!(relative_eq!(f.stop_time * 2.0, s.stop_time, epsilon = 1e-9, max_relative = 1e-9));
            let levels = |e: &spn_player::schedule::ScheduleEntry| {
                e.envelope.breakpoints().iter().map(|p| p.level).collect::<Vec<_>>()
            };
            prop_assert_eq!(levels(s), levels(f));
        }
    }
}
