use super::types::PetType;

const DOG: &str = r"  ∩━━━∩
  (●ᴥ●)
  / ▽ \
 /|___|\
  |  |";

const CAT: &str = r"  /\___/\
 (  o o  )
 (  =^=  )
  --^--";

const BIRD: &str = r"    A_
   (°v°)
   (   )
   -″-″-";

const RABBIT: &str = r"   /\ /\
  ((.Y.))
   ()~()
   (-)-";

const FISH: &str = r"    o
  ><(((°>
    o";

/// Text glyph shown on the pet's home screen.
pub fn art_for(pet_type: PetType) -> &'static str {
    match pet_type {
        PetType::Dog => DOG,
        PetType::Cat => CAT,
        PetType::Bird => BIRD,
        PetType::Rabbit => RABBIT,
        PetType::Fish => FISH,
    }
}
