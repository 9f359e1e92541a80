use log::{debug, info};
use std::sync::Arc;

use crate::logutil::escape_log;
use crate::pet::{
    items_for, Item, ItemFilter, NotificationSink, Pet, PetError, PetId, PetType,
};

/// # Keeper Session
///
/// Owns everything a player has going on in one run of the game: the adopted
/// pets, which one is currently selected, and whether the top-level loop should
/// keep running. Nothing here is global; the shell owns the session and passes
/// it around explicitly.
///
/// ## Pet Lifecycle
///
/// 1. **Adopted** - [`Session::adopt`] creates the pet, attaches the session's
///    sinks and selects it
/// 2. **Alive** - actions and passive decay go through [`Session::current_mut`]
/// 3. **Dead** - the pet announced its death; it stays listed until
/// 4. **Acknowledged** - [`Session::acknowledge_death`] removes it and clears
///    the selection if it pointed there
///
/// ## Usage
///
/// ```rust
/// use petsim::pet::PetType;
/// use petsim::session::Session;
///
/// let mut session = Session::new();
/// let id = session.adopt("Rex", PetType::Dog).unwrap();
/// assert_eq!(session.current_id(), Some(id));
/// assert_eq!(session.current().unwrap().hunger(), 50);
/// ```
pub struct Session {
    pets: Vec<(PetId, Pet)>,
    current: Option<PetId>,
    next_id: u32,
    running: bool,
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            pets: Vec::new(),
            current: None,
            next_id: 1,
            running: true,
            sinks: Vec::new(),
        }
    }

    /// Sink attached to every pet adopted from now on.
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Adopt a pet, attach the session sinks and make it the current pet.
    pub fn adopt(&mut self, name: &str, pet_type: PetType) -> Result<PetId, PetError> {
        let mut pet = Pet::adopt(name, pet_type)?;
        for sink in &self.sinks {
            pet.subscribe(sink.clone());
        }
        let id = PetId(self.next_id);
        self.next_id += 1;
        self.pets.push((id, pet));
        self.current = Some(id);
        debug!("session: adopted pet {}", id);
        Ok(id)
    }

    /// All adopted pets, in adoption order.
    pub fn pets(&self) -> impl Iterator<Item = (PetId, &Pet)> {
        self.pets.iter().map(|(id, pet)| (*id, pet))
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn get(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, id: PetId) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
    }

    /// Select the pet the next actions apply to.
    pub fn select(&mut self, id: PetId) -> Result<(), PetError> {
        if self.get(id).is_none() {
            return Err(PetError::UnknownPet(id));
        }
        self.current = Some(id);
        Ok(())
    }

    /// Select by 1-based position in [`Session::pets`], as shown in menus.
    pub fn select_index(&mut self, position: usize) -> Result<PetId, PetError> {
        let id = position
            .checked_sub(1)
            .and_then(|i| self.pets.get(i))
            .map(|(id, _)| *id)
            .ok_or(PetError::InvalidSelection(position))?;
        self.current = Some(id);
        Ok(id)
    }

    pub fn deselect(&mut self) {
        self.current = None;
    }

    pub fn current_id(&self) -> Option<PetId> {
        self.current
    }

    pub fn current(&self) -> Result<&Pet, PetError> {
        let id = self.current.ok_or(PetError::NoPetSelected)?;
        self.get(id).ok_or(PetError::UnknownPet(id))
    }

    pub fn current_mut(&mut self) -> Result<&mut Pet, PetError> {
        let id = self.current.ok_or(PetError::NoPetSelected)?;
        self.get_mut(id).ok_or(PetError::UnknownPet(id))
    }

    /// Items the current pet can use that match `filter`.
    pub fn items_for_current(&self, filter: ItemFilter) -> Result<Vec<&'static Item>, PetError> {
        let pet = self.current()?;
        Ok(items_for(pet.pet_type(), filter))
    }

    /// Remove a pet whose death has been shown to the player.
    /// Returns the removed pet; a living pet is left in place.
    pub fn acknowledge_death(&mut self, id: PetId) -> Result<Pet, PetError> {
        let pos = self
            .pets
            .iter()
            .position(|(pid, pet)| *pid == id && pet.death_cause().is_some())
            .ok_or(PetError::UnknownPet(id))?;
        let (_, pet) = self.pets.remove(pos);
        if self.current == Some(id) {
            self.current = None;
        }
        info!("session: {} laid to rest", escape_log(pet.name()));
        Ok(pet)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("pets", &self.pets)
            .field("current", &self.current)
            .field("running", &self.running)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
