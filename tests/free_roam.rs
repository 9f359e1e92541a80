use petsim::pet::{
    ActivityOutcome, CancelHandle, InstantSuspender, Minutes, Notification, Pet, PetError,
    PetType, RecordingSink, TokioSuspender,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

fn adopt(name: &str, pet_type: PetType) -> (Pet, Arc<RecordingSink>) {
    let mut pet = Pet::adopt(name, pet_type).expect("valid name");
    let sink = Arc::new(RecordingSink::new());
    pet.subscribe(sink.clone());
    (pet, sink)
}

#[test]
fn minutes_outside_window_are_refused_up_front() {
    assert_eq!(Minutes::new(0), Err(PetError::InvalidMinutes(0)));
    assert_eq!(Minutes::new(45), Err(PetError::InvalidMinutes(45)));
}

#[tokio::test]
async fn every_roam_emits_event_pairs_and_one_completion() {
    let suspender = InstantSuspender::new();
    for seed in 0..25u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for minutes in [1, 5, 12, 30] {
            let (mut pet, sink) = adopt("Kiwi", PetType::Bird);
            let before = pet.stats();
            let outcome = pet
                .take_time(Minutes::new(minutes).unwrap(), &mut rng, &suspender)
                .await;
            assert_eq!(outcome, ActivityOutcome::Completed);
            assert_eq!(pet.stats(), before);

            let events = sink.events();
            assert_eq!(
                events.first(),
                Some(&Notification::Activity(
                    "Kiwi is going to spend some time on their own...".into()
                ))
            );
            assert_eq!(
                events.last(),
                Some(&Notification::Status(
                    "Kiwi finished spending time on their own!".into()
                ))
            );
            let completions = events
                .iter()
                .filter(|n| n.message() == "Kiwi finished spending time on their own!")
                .count();
            assert_eq!(completions, 1);

            // Everything between the opening and the completion comes in
            // activity/status pairs carrying the same message.
            let body = &events[1..events.len() - 1];
            assert!(!body.is_empty());
            assert_eq!(body.len() % 2, 0);
            let bound = Minutes::new(minutes).unwrap().event_bound() as usize;
            assert!(body.len() / 2 < bound);
            for pair in body.chunks(2) {
                assert!(pair[0].is_activity() && pair[1].is_status());
                assert_eq!(pair[0].message(), pair[1].message());
                assert!(pair[0].message().starts_with("Kiwi "));
            }
        }
    }
}

#[tokio::test]
async fn same_seed_same_story() {
    let suspender = InstantSuspender::new();
    let run = |seed| {
        let suspender = suspender.clone();
        async move {
            let (mut pet, sink) = adopt("Nemo", PetType::Fish);
            let mut rng = StdRng::seed_from_u64(seed);
            pet.take_time(Minutes::new(30).unwrap(), &mut rng, &suspender)
                .await;
            sink.events()
        }
    };
    assert_eq!(run(42).await, run(42).await);
}

#[tokio::test]
async fn cancelled_roam_stops_without_completion() {
    let cancel = CancelHandle::new();
    cancel.cancel();
    let suspender = InstantSuspender::new().with_cancel(cancel);
    let (mut pet, sink) = adopt("Rex", PetType::Dog);
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = pet
        .take_time(Minutes::new(10).unwrap(), &mut rng, &suspender)
        .await;

    assert_eq!(outcome, ActivityOutcome::Aborted);
    let events = sink.events();
    // Opening line and the first event's pair; the wait after it is where the
    // cancellation lands, so no completion follows.
    assert_eq!(events.len(), 3);
    assert!(events[0].is_activity() && events[1].is_activity() && events[2].is_status());
    assert_eq!(events[1].message(), events[2].message());
    assert!(!events
        .iter()
        .any(|n| n.message().contains("finished spending time")));
}

#[tokio::test(start_paused = true)]
async fn roam_waits_between_events_on_tokio() {
    let (mut pet, sink) = adopt("Tom", PetType::Cat);
    let suspender = TokioSuspender::new(1.0);
    let mut rng = StdRng::seed_from_u64(9);
    let started = tokio::time::Instant::now();

    pet.take_time(Minutes::new(30).unwrap(), &mut rng, &suspender)
        .await;

    let pairs = (sink.events().len() - 2) / 2;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2 * pairs as u64), "{:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn roam_event_pair_arrives_before_the_pause() {
    let suspender = TokioSuspender::new(1.0);
    let (mut pet, sink) = adopt("Tom", PetType::Cat);
    let mut rng = StdRng::seed_from_u64(3);

    let task = tokio::spawn(async move {
        pet.take_time(Minutes::new(30).unwrap(), &mut rng, &suspender)
            .await
    });
    // Halfway through the first gap the opening line and the whole first
    // event have been reported.
    tokio::time::sleep(Duration::from_secs(1)).await;
    let early = sink.events();
    assert_eq!(early.len(), 3);
    assert!(early[1].is_activity() && early[2].is_status());
    assert_eq!(early[1].message(), early[2].message());

    assert_eq!(task.await.unwrap(), ActivityOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn cancelling_mid_item_leaves_stats_unchanged() {
    let item = petsim::pet::find_item("Kibble").unwrap();
    let suspender = TokioSuspender::new(1.0);
    let cancel = suspender.cancel_handle();
    let (mut pet, sink) = adopt("Rex", PetType::Dog);

    let task = tokio::spawn(async move {
        let outcome = pet.use_item(item, &suspender).await;
        (pet, outcome)
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    cancel.cancel();
    let (pet, outcome) = task.await.unwrap();

    assert_eq!(outcome, ActivityOutcome::Aborted);
    assert_eq!(pet.hunger(), 50);
    assert_eq!(
        sink.events(),
        vec![Notification::Activity("Rex is eating Kibble...".into())]
    );
}
