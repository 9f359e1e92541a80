use petsim::pet::InstantSuspender;
use petsim::shell::{Console, Shell};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Cloneable writer so the test can read back what the shell printed.
#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<u8>>>);

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Transcript {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

async fn play(script: &'static str) -> (String, usize, Option<(u32, u32, u32)>) {
    play_bytes(script.as_bytes()).await
}

async fn play_bytes(script: &'static [u8]) -> (String, usize, Option<(u32, u32, u32)>) {
    let transcript = Transcript::default();
    let mut shell = Shell::new(
        script,
        Console::new(transcript.clone()),
        Arc::new(InstantSuspender::new()),
    )
    .with_seed(7);
    shell.run().await.unwrap();

    let session = shell.session();
    let stats = session
        .pets()
        .next()
        .map(|(_, pet)| (pet.hunger(), pet.sleep(), pet.fun()));
    (transcript.text(), session.len(), stats)
}

#[tokio::test]
async fn adopt_and_feed_a_dog() {
    // adopt, Dog, "Rex", feed, Kibble, leave home, exit
    let (out, pets, stats) = play("1\n1\nRex\n1\n1\n0\n0\n").await;

    assert!(out.contains("=== Rex's Home ==="));
    assert!(out.contains("Rex is eating Kibble..."));
    // One decay tick on arrival before eating.
    assert!(out.contains("Rex enjoyed their meal! Hunger is now at 79%"));
    assert!(out.contains("Rex is getting tired! Current energy: 49%"));
    assert!(out.ends_with("Thank you for playing! Come back soon!\n"));

    assert_eq!(pets, 1);
    assert_eq!(stats, Some((78, 48, 48)));
}

#[tokio::test]
async fn cat_menu_only_offers_cat_food() {
    let (out, _, stats) = play("1\n2\nTom\n1\n0\n0\n0\n").await;

    assert!(out.contains("=== Food ==="));
    assert!(out.contains("1. Tuna Flakes"));
    assert!(out.contains("2. Chicken Treat"));
    assert!(!out.contains("Kibble"));
    // Arrival tick plus the tick after backing out of the menu.
    assert_eq!(stats, Some((48, 48, 48)));
}

#[tokio::test]
async fn free_roam_reports_back() {
    let (out, _, _) = play("1\n4\nNemo\n4\n10\n0\n0\n").await;

    assert!(out.contains("Nemo will spend 10 minutes on their own..."));
    assert!(out.contains("Nemo is going to spend some time on their own..."));
    assert!(out.contains("Nemo finished spending time on their own!"));
}

#[tokio::test]
async fn free_roam_rejects_out_of_range_minutes() {
    let (out, _, _) = play("1\n4\nNemo\n4\n31\n0\n0\n").await;

    assert!(out.contains("Please enter a valid number between 1 and 30."));
    assert!(!out.contains("Nemo is going to spend some time on their own..."));
}

#[tokio::test]
async fn neglected_pet_dies_and_is_removed() {
    let mut script = String::from("1\n3\nTweety\n");
    // Arrival brings every stat to 49; each nap costs one more tick.
    script.push_str(&"5\n".repeat(49));
    // Acknowledge the death, look at the (now empty) pet list, exit.
    script.push_str("\n2\n0\n");
    let script: &'static str = Box::leak(script.into_boxed_str());

    let (out, pets, _) = play(script).await;

    assert!(out.contains("Tweety has died from hunger..."));
    assert!(out.contains("Press Enter to continue..."));
    assert!(out.contains("You haven't adopted any pets yet!"));
    assert_eq!(pets, 0);
}

#[tokio::test]
async fn end_of_input_ends_the_game() {
    let (out, pets, _) = play("1\n1\n").await;

    assert!(out.ends_with("Thank you for playing! Come back soon!\n"));
    assert_eq!(pets, 0);
}

#[tokio::test]
async fn blank_name_is_refused() {
    let (out, pets, _) = play("1\n1\n   \n0\n").await;

    assert!(out.contains("You must enter a name for your pet."));
    assert_eq!(pets, 0);
}

#[tokio::test]
async fn garbled_line_is_an_invalid_choice() {
    // adopt, unreadable species line, exit
    let (out, pets, _) = play_bytes(b"1\n\xff\n0\n").await;

    assert!(out.contains("Invalid selection. Please try again."));
    assert!(out.ends_with("Thank you for playing! Come back soon!\n"));
    assert_eq!(pets, 0);

    let (out, _, _) = play_bytes(b"\xff\xfe\n0\n").await;
    assert!(out.contains("Invalid option. Please try again."));
    assert!(out.ends_with("Thank you for playing! Come back soon!\n"));
}
