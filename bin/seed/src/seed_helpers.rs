//! Sample data for the seed tool. Everything is derived from the index so a
//! re-seed always produces the same catalogue (ids and timestamps aside).

use yc_core::models::{Campground, CampgroundInput};

const CITIES: [(&str, &str); 50] = [
    ("New York", "New York"),
    ("Los Angeles", "California"),
    ("Chicago", "Illinois"),
    ("Houston", "Texas"),
    ("Philadelphia", "Pennsylvania"),
    ("Phoenix", "Arizona"),
    ("San Antonio", "Texas"),
    ("San Diego", "California"),
    ("Dallas", "Texas"),
    ("San Jose", "California"),
    ("Austin", "Texas"),
    ("Indianapolis", "Indiana"),
    ("Jacksonville", "Florida"),
    ("San Francisco", "California"),
    ("Columbus", "Ohio"),
    ("Charlotte", "North Carolina"),
    ("Fort Worth", "Texas"),
    ("Detroit", "Michigan"),
    ("El Paso", "Texas"),
    ("Memphis", "Tennessee"),
    ("Seattle", "Washington"),
    ("Denver", "Colorado"),
    ("Washington", "District of Columbia"),
    ("Boston", "Massachusetts"),
    ("Nashville", "Tennessee"),
    ("Baltimore", "Maryland"),
    ("Oklahoma City", "Oklahoma"),
    ("Louisville", "Kentucky"),
    ("Portland", "Oregon"),
    ("Las Vegas", "Nevada"),
    ("Milwaukee", "Wisconsin"),
    ("Albuquerque", "New Mexico"),
    ("Tucson", "Arizona"),
    ("Fresno", "California"),
    ("Sacramento", "California"),
    ("Long Beach", "California"),
    ("Kansas City", "Missouri"),
    ("Mesa", "Arizona"),
    ("Virginia Beach", "Virginia"),
    ("Atlanta", "Georgia"),
    ("Colorado Springs", "Colorado"),
    ("Omaha", "Nebraska"),
    ("Raleigh", "North Carolina"),
    ("Miami", "Florida"),
    ("Oakland", "California"),
    ("Minneapolis", "Minnesota"),
    ("Tulsa", "Oklahoma"),
    ("Cleveland", "Ohio"),
    ("Wichita", "Kansas"),
    ("Boise", "Idaho"),
];

const DESCRIPTORS: [&str; 16] = [
    "Forest", "Ancient", "Petrified", "Roaring", "Cascade", "Tumbling", "Silent", "Redwood",
    "Bullfrog", "Maple", "Misty", "Elk", "Grizzly", "Ocean", "Sea", "Sky",
];

const PLACES: [&str; 14] = [
    "Flats", "Village", "Canyon", "Pond", "Group Camp", "Horse Camp", "Ghost Town", "Camp",
    "Dispersed Camp", "Backcountry", "River", "Creek", "Creekside", "Bay",
];

pub const DESCRIPTION: &str = "I Love this place";

/// The `i`-th generated campground.
pub fn campground(i: usize) -> Campground {
    let (city, state) = CITIES[i % CITIES.len()];
    Campground::new(CampgroundInput {
        title: format!("{} {}", DESCRIPTORS[i % DESCRIPTORS.len()], PLACES[(i * 5 + 3) % PLACES.len()]),
        location: format!("{city}, {state}"),
        image: format!("https://picsum.photos/400?random={i}"),
        description: DESCRIPTION.to_string(),
        price: (10 + (i * 7) % 30) as f64,
    })
}

pub fn campgrounds(count: usize) -> Vec<Campground> {
    (0..count).map(campground).collect()
}
