//! Roster sources for the batch driver.
//!
//! The built-in class list is used when no roster file is given. A CSV file
//! with a `name,student_id` header can be supplied instead.

use std::path::Path;

use roster_core::student::NewStudent;

/// The built-in class list as `(name, student_id)` pairs.
pub const DEFAULT_ROSTER: &[(&str, &str)] = &[
  ("Abhishek P Shaji", "HKC22CS001"),
  ("Absher KC", "HKC22CS002"),
  ("Agnes CA", "HKC22CS003"),
  ("Alen Peter", "HKC22CS004"),
  ("Anagha Mohan", "HKC22CS005"),
  ("Ann Mary Binoy", "HKC22CS006"),
  ("Antony James", "HKC22CS008"),
  ("Aravind K A", "HKC22CS009"),
  ("Arjun Pradeep", "HKC22CS010"),
  ("Atheetha Anoop", "HKC22CS011"),
  ("A V Avandhika", "HKC22CS012"),
  ("Benyamin Eldho", "HKC22CS013"),
  ("Blesson Kuriakose", "HKC22CS014"),
  ("Dinil Dev", "HKC22CS015"),
  ("Edwin Shaji", "HKC22CS016"),
  ("Fenil Sonilal", "HKC22CS018"),
  ("Gamil Jacob", "HKC22CS019"),
  ("Issac Baby", "HKC22CS020"),
  ("Jerin Joy", "HKC22CS021"),
  ("Joyal Thomas", "HKC22CS022"),
  ("Mathew Elisha Thomas", "HKC22CS023"),
  ("Mereena James", "HKC22CS024"),
  ("Muhammed Midulaj", "HKC22CS026"),
  ("Nandana Ajai", "HKC22CS028"),
  ("Nethan M Shaji", "HKC22CS029"),
  ("Pavitra M", "HKC22CS030"),
  ("Sallal K S", "HKC22CS031"),
  ("Sanal Saju", "HKC22CS032"),
  ("Sandra Chandran", "HKC22CS034"),
  ("Sonamol C M", "HKC22CS036"),
  ("Vismaya K", "HKC22CS037"),
  ("Amitha Bhaskaran", "HKC22CS038"),
  ("Hana K S", "HKC22CS039"),
  ("Nandhana K P", "HKC22CS040"),
  ("Abhinandh Haridas", "HKC22CE001"),
  ("Adhila Sherin", "HKC22CE002"),
  ("Anex Benny", "HKC22CE004"),
  ("Anju Maria George", "HKC22CE005"),
  ("Arya Devan", "HKC22CE007"),
  ("Lumina Bishri", "HKC22CE008"),
  ("Sanila A V", "HKC22CE010"),
  ("Sreepath Sudarshan", "HKC22CE011"),
  ("Ananda Krishnan P R", "HKC22CE012"),
  ("Sanika C S", "HKC22CE013"),
];

/// [`DEFAULT_ROSTER`] as owned entries, in list order.
pub fn default_roster() -> Vec<NewStudent> {
  DEFAULT_ROSTER
    .iter()
    .map(|(name, id)| NewStudent::new(*name, *id))
    .collect()
}

/// Read a roster from a CSV file with `name` and `student_id` columns.
pub fn load_csv(path: &Path) -> Result<Vec<NewStudent>, csv::Error> {
  csv::Reader::from_path(path)?.deserialize().collect()
}
