//! Console front end.
//!
//! A thin text menu over [`Session`]: it reads one line per prompt, calls into
//! the pet core and prints whatever notifications the core emits. All game
//! rules live in [`crate::pet`]; this module only renders and parses.

use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{ErrorKind, Write};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::pet::{
    ActivityOutcome, Item, ItemFilter, ItemType, Minutes, NotificationSink, Pet, PetStat,
    PetType, Suspend, MAX_FREE_ROAM_MINUTES, MIN_FREE_ROAM_MINUTES,
};
use crate::session::Session;

/// Shared, line-oriented output used by both the menus and the console sink.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write text followed by a newline. Output errors are ignored; a broken
    /// terminal must not end the game.
    pub fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }

    /// Write a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = write!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

/// Prints every notification on its own line, preceded by a blank line.
pub struct ConsoleSink {
    console: Console,
}

impl ConsoleSink {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl NotificationSink for ConsoleSink {
    fn on_status(&self, message: &str) {
        self.console.line(&format!("\n{}", message));
    }

    fn on_activity(&self, message: &str) {
        self.console.line(&format!("\n{}", message));
    }

    fn on_death(&self, _message: &str) {
        // The status notification already carried the text; the shell handles
        // the acknowledgement prompt itself.
    }
}

/// Parse a menu selection. Returns `None` for anything that is not a number.
pub fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()
}

pub fn format_main_menu() -> String {
    let mut out = String::from("\n=== Virtual Pet Simulator ===\n\n");
    out.push_str("1. Adopt a New Pet\n");
    out.push_str("2. My Pets\n");
    out.push_str("0. Exit\n");
    out
}

pub fn format_adoption_menu() -> String {
    let mut out = String::from("\n=== Adopt a Pet ===\n\n");
    for (idx, pet_type) in PetType::ALL.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, pet_type));
    }
    out.push_str("0. Back\n");
    out
}

pub fn format_pet_list(session: &Session) -> String {
    if session.is_empty() {
        return "\nYou haven't adopted any pets yet!\n".to_string();
    }
    let mut out = String::from("\n=== My Pets ===\n\n");
    for (idx, (_, pet)) in session.pets().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, pet.status_line()));
    }
    out.push_str("0. Back\n");
    out
}

pub fn format_home(pet: &Pet) -> String {
    let mut out = format!("\n=== {}'s Home ===\n\n", pet.name());
    out.push_str(pet.art());
    out.push_str("\n\nStats:\n");
    out.push_str(&format!("Hunger: {}%\n", pet.hunger()));
    out.push_str(&format!("Sleep: {}%\n", pet.sleep()));
    out.push_str(&format!("Fun: {}%\n", pet.fun()));
    out.push_str("\nWhat would you like to do?\n");
    out.push_str("1. Feed Pet\n");
    out.push_str("2. Play with Pet\n");
    out.push_str("3. Put Pet to Bed\n");
    out.push_str("4. Take Some Time\n");
    out.push_str("5. Take a Nap\n");
    out.push_str("0. Back to Main Menu\n");
    out
}

pub fn format_item_menu(category: &str, items: &[&Item]) -> String {
    let mut out = format!("\n=== {} ===\n\n", category);
    if items.is_empty() {
        out.push_str("Nothing here suits your pet.\n");
    }
    for (idx, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (+{} {}, {}s)\n",
            idx + 1,
            item.name,
            item.effect_amount,
            item.affected_stat,
            item.duration.as_secs_f32()
        ));
    }
    out.push_str("0. Back\n");
    out
}

enum HomeAction {
    Menu(&'static str, ItemFilter),
    Roam,
    Nap,
    Leave,
}

fn home_action(choice: Option<usize>) -> Option<HomeAction> {
    match choice? {
        1 => Some(HomeAction::Menu("Food", ItemFilter::Category(ItemType::Food))),
        2 => Some(HomeAction::Menu("Toys", ItemFilter::Category(ItemType::Toy))),
        3 => Some(HomeAction::Menu("Sleep Items", ItemFilter::Stat(PetStat::Sleep))),
        4 => Some(HomeAction::Roam),
        5 => Some(HomeAction::Nap),
        0 => Some(HomeAction::Leave),
        _ => None,
    }
}

/// Interactive menu loop over any line-based input.
pub struct Shell<R> {
    input: Lines<R>,
    console: Console,
    session: Session,
    suspender: Arc<dyn Suspend>,
    rng: StdRng,
}

impl<R: AsyncBufRead + Unpin> Shell<R> {
    pub fn new(input: R, console: Console, suspender: Arc<dyn Suspend>) -> Self {
        let sink: Arc<dyn NotificationSink> = Arc::new(ConsoleSink::new(console.clone()));
        Self {
            input: input.lines(),
            console,
            session: Session::new().with_sink(sink),
            suspender,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for free-roam events.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Next input line; end of input stops the session. A line that is not
    /// valid UTF-8 comes back empty so the menu treats it as an invalid choice.
    async fn read(&mut self) -> Result<Option<String>> {
        match self.input.next_line().await {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => {
                debug!("shell: end of input");
                self.session.stop();
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                debug!("shell: unreadable input line: {}", e);
                Ok(Some(String::new()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.console.prompt(prompt);
        self.read().await
    }

    /// Run until the player exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        while self.session.is_running() {
            self.console.prompt(&format_main_menu());
            let Some(line) = self.ask("\nSelect an option: ").await? else {
                break;
            };
            match parse_choice(&line) {
                Some(1) => self.adopt().await?,
                Some(2) => self.choose_pet().await?,
                Some(0) => self.session.stop(),
                _ => self.console.line("\nInvalid option. Please try again."),
            }
        }
        self.console.line("Thank you for playing! Come back soon!");
        Ok(())
    }

    async fn adopt(&mut self) -> Result<()> {
        self.console.prompt(&format_adoption_menu());
        let Some(line) = self.ask("\nChoose a pet type: ").await? else {
            return Ok(());
        };
        let pet_type = match parse_choice(&line) {
            Some(0) => return Ok(()),
            Some(n) if (1..=PetType::ALL.len()).contains(&n) => PetType::ALL[n - 1],
            _ => {
                self.console.line("\nInvalid selection. Please try again.");
                return Ok(());
            }
        };
        let Some(name) = self.ask("\nEnter a name for your pet: ").await? else {
            return Ok(());
        };
        match self.session.adopt(&name, pet_type) {
            Ok(_) => self.home().await,
            Err(e) => {
                debug!("shell: adoption refused: {}", e);
                self.console.line("\nYou must enter a name for your pet.");
                Ok(())
            }
        }
    }

    async fn choose_pet(&mut self) -> Result<()> {
        self.console.prompt(&format_pet_list(&self.session));
        if self.session.is_empty() {
            return Ok(());
        }
        let Some(line) = self.ask("\nSelect a pet: ").await? else {
            return Ok(());
        };
        match parse_choice(&line) {
            Some(0) => Ok(()),
            Some(n) => match self.session.select_index(n) {
                Ok(_) => self.home().await,
                Err(_) => {
                    self.console.line("\nInvalid selection. Please try again.");
                    Ok(())
                }
            },
            None => {
                self.console.line("\nPlease enter a valid number.");
                Ok(())
            }
        }
    }

    async fn home(&mut self) -> Result<()> {
        // Decay once on arrival, then after every action.
        if self.decay().await? {
            return Ok(());
        }
        while self.session.is_running() {
            let Ok(pet) = self.session.current() else {
                return Ok(());
            };
            self.console.prompt(&format_home(pet));
            let Some(line) = self.ask("\nSelect an action (0-5): ").await? else {
                return Ok(());
            };
            match home_action(parse_choice(&line)) {
                Some(HomeAction::Menu(category, filter)) => {
                    self.item_menu(category, filter).await?
                }
                Some(HomeAction::Roam) => self.roam().await?,
                Some(HomeAction::Nap) => {
                    let suspender = self.suspender.clone();
                    let pet = self.session.current_mut()?;
                    pet.sleep_action(suspender.as_ref()).await;
                }
                Some(HomeAction::Leave) => {
                    self.session.deselect();
                    return Ok(());
                }
                None => {
                    self.console.line("\nInvalid option. Please try again.");
                    continue;
                }
            }
            if self.decay().await? {
                return Ok(());
            }
        }
        Ok(())
    }

    async fn item_menu(&mut self, category: &str, filter: ItemFilter) -> Result<()> {
        let items = self.session.items_for_current(filter)?;
        self.console.prompt(&format_item_menu(category, &items));
        let Some(line) = self.ask("\nSelect an item: ").await? else {
            return Ok(());
        };
        let item = match parse_choice(&line) {
            Some(0) => return Ok(()),
            Some(n) if (1..=items.len()).contains(&n) => items[n - 1],
            _ => {
                self.console.line("\nInvalid selection.");
                return Ok(());
            }
        };
        let suspender = self.suspender.clone();
        let pet = self.session.current_mut()?;
        let outcome = pet.use_item(item, suspender.as_ref()).await;
        debug!("shell: {} -> {:?}", item.name, outcome);
        Ok(())
    }

    async fn roam(&mut self) -> Result<()> {
        let prompt = format!(
            "\nHow many minutes should your pet spend on their own? ({}-{}): ",
            MIN_FREE_ROAM_MINUTES, MAX_FREE_ROAM_MINUTES
        );
        let Some(line) = self.ask(&prompt).await? else {
            return Ok(());
        };
        let minutes = match line.trim().parse::<u32>().map(Minutes::new) {
            Ok(Ok(m)) => m,
            _ => {
                self.console.line(&format!(
                    "\nPlease enter a valid number between {} and {}.",
                    MIN_FREE_ROAM_MINUTES, MAX_FREE_ROAM_MINUTES
                ));
                return Ok(());
            }
        };
        let suspender = self.suspender.clone();
        let pet = self.session.current_mut()?;
        self.console.line(&format!(
            "\n{} will spend {} minutes on their own...",
            pet.name(),
            minutes.get()
        ));
        let outcome = pet.take_time(minutes, &mut self.rng, suspender.as_ref()).await;
        if outcome == ActivityOutcome::Aborted {
            debug!("shell: free roam aborted");
        }
        Ok(())
    }

    /// Passive decay for the current pet. Returns true when the pet died and
    /// has been laid to rest.
    async fn decay(&mut self) -> Result<bool> {
        let id = match self.session.current_id() {
            Some(id) => id,
            None => return Ok(true),
        };
        let pet = self.session.current_mut()?;
        if pet.update_stats().is_none() {
            return Ok(false);
        }
        self.console.prompt("\nPress Enter to continue...");
        self.read().await?;
        self.session.acknowledge_death(id)?;
        Ok(true)
    }
}
