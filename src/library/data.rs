//! Static progression and song tables.

use super::{Progression, Song};

fn progression(
    key: &'static str,
    name: &'static str,
    numerals: &'static str,
    chords: &'static [&'static str],
) -> Progression {
    Progression {
        key,
        name,
        numerals,
        chords,
    }
}

fn song(title: &'static str, artist: &'static str, chords: &'static [&'static str]) -> Song {
    Song {
        title,
        artist,
        chords,
    }
}

/// The progression table, in display order.
pub fn all_progressions() -> Vec<Progression> {
    vec![
        progression("pop", "Pop", "I-V-vi-IV", &["G", "D", "Em", "C"]),
        progression("rock", "Rock", "I-IV-V-I", &["G", "C", "D", "G"]),
        progression(
            "blues",
            "Blues",
            "I-I-I-I-IV-IV-I-I-V-IV-I-V",
            &["A", "A", "A", "A", "D", "D", "A", "A", "E", "D", "A", "E"],
        ),
        progression("sad", "Sad", "vi-IV-I-V", &["Am", "F", "C", "G"]),
        progression("jazz", "Jazz", "ii-V-I", &["Dm7", "G7", "Cmaj7"]),
        progression("folk", "Folk", "I-IV-I-V", &["G", "C", "G", "D"]),
        progression("doowop", "Doo-Wop", "I-vi-IV-V", &["C", "Am", "F", "G"]),
        progression("andalusian", "Andalusian", "i-VII-VI-V", &["Am", "G", "F", "E"]),
    ]
}

/// The song table, in display order.
pub fn all_songs() -> Vec<Song> {
    vec![
        song("Wonderwall", "Oasis", &["Em", "G", "D", "A"]),
        song("Horse With No Name", "America", &["Em", "D6/9"]),
        song("Knockin' on Heaven's Door", "Bob Dylan", &["G", "D", "Am", "C"]),
        song("Let It Be", "Beatles", &["C", "G", "Am", "F"]),
        song("No Woman No Cry", "Bob Marley", &["C", "G", "Am", "F"]),
        song("Leaving on a Jet Plane", "John Denver", &["G", "C", "D"]),
        song("Brown Eyed Girl", "Van Morrison", &["G", "C", "G", "D"]),
        song("Sweet Home Alabama", "Lynyrd Skynyrd", &["D", "C", "G"]),
        song("Wish You Were Here", "Pink Floyd", &["Em", "G", "A7", "Em"]),
        song("Three Little Birds", "Bob Marley", &["A", "D", "E"]),
        song("Free Fallin'", "Tom Petty", &["D", "G", "A"]),
        song("Bad Moon Rising", "CCR", &["D", "A", "G"]),
        song("Have You Ever Seen the Rain", "CCR", &["Am", "F", "C", "G"]),
        song("Proud Mary", "CCR", &["D", "A", "Bm", "G"]),
        song("Wild Thing", "The Troggs", &["A", "D", "E"]),
        song("La Bamba", "Ritchie Valens", &["C", "F", "G"]),
        song("Twist and Shout", "Beatles", &["D", "G", "A"]),
        song("Love Me Do", "Beatles", &["G", "C", "D"]),
        song("Blowin' in the Wind", "Bob Dylan", &["G", "C", "D"]),
        song("Mr. Tambourine Man", "Bob Dylan", &["G", "A", "D"]),
        song("Hey Jude", "Beatles", &["F", "C", "Bb"]),
        song("Here Comes the Sun", "Beatles", &["G", "C", "D", "A"]),
        song("Blackbird", "Beatles", &["G", "Am", "C", "D"]),
        song("Yesterday", "Beatles", &["G", "F", "Em", "D"]),
        song("Redemption Song", "Bob Marley", &["G", "Em", "C", "Am", "D"]),
        song("Is This Love", "Bob Marley", &["F", "Am", "Dm", "C"]),
        song("Wagon Wheel", "Old Crow Medicine Show", &["G", "D", "Em", "C"]),
        song("Ho Hey", "The Lumineers", &["C", "F", "Am", "G"]),
        song("Riptide", "Vance Joy", &["Am", "G", "C"]),
        song("I'm Yours", "Jason Mraz", &["G", "D", "Em", "C"]),
        song("Hey There Delilah", "Plain White T's", &["D", "A", "Bm", "G"]),
        song("Chasing Cars", "Snow Patrol", &["A", "E", "D"]),
        song("The Scientist", "Coldplay", &["Dm", "F", "C", "Bb"]),
        song("Yellow", "Coldplay", &["G", "D", "C"]),
        song("Fix You", "Coldplay", &["C", "Em", "G"]),
        song("Clocks", "Coldplay", &["D", "Am", "Em"]),
        song("Counting Stars", "OneRepublic", &["Am", "C", "G", "F"]),
        song("Demons", "Imagine Dragons", &["D", "A", "Bm", "G"]),
        song("Radioactive", "Imagine Dragons", &["Am", "C", "G", "D"]),
        song("Viva La Vida", "Coldplay", &["C", "D", "G", "Em"]),
        song("Use Somebody", "Kings of Leon", &["C", "Em", "Am", "F"]),
        song("Boulevard of Broken Dreams", "Green Day", &["Em", "G", "D", "A"]),
        song("Good Riddance", "Green Day", &["G", "Cadd9", "D"]),
        song("21 Guns", "Green Day", &["D", "Bm", "G", "A"]),
        song("When I Come Around", "Green Day", &["G", "D", "Em", "C"]),
        song("Take Me Home, Country Roads", "John Denver", &["G", "Em", "D", "C"]),
        song("Ring of Fire", "Johnny Cash", &["G", "C", "D"]),
        song("I Walk the Line", "Johnny Cash", &["A", "D", "E"]),
        song("Jolene", "Dolly Parton", &["Am", "C", "G", "Em"]),
        song("Crazy", "Patsy Cline", &["G", "E7", "Am", "D7"]),
        song("The Gambler", "Kenny Rogers", &["C", "F", "G"]),
        song("With or Without You", "U2", &["D", "A", "Bm", "G"]),
        song("One", "U2", &["Am", "D", "Fmaj7", "G"]),
        song("Every Breath You Take", "The Police", &["A", "F#m", "D", "E"]),
        song("Zombie", "The Cranberries", &["Em", "C", "G", "D"]),
        song("Dreams", "The Cranberries", &["G", "D", "Am", "C"]),
        song("Linger", "The Cranberries", &["A", "D", "E"]),
        song("Creep", "Radiohead", &["G", "B", "C"]),
        song("Torn", "Natalie Imbruglia", &["F", "Am", "Bb", "C"]),
        song("Breakfast at Tiffany's", "Deep Blue Something", &["D", "G", "A"]),
        song("Someone Like You", "Adele", &["A", "E", "F#m", "D"]),
        song("Rolling in the Deep", "Adele", &["Am", "Em", "G"]),
        song("Stay With Me", "Sam Smith", &["Am", "F", "C"]),
        song("Thinking Out Loud", "Ed Sheeran", &["D", "G", "A", "Bm"]),
        song("Perfect", "Ed Sheeran", &["G", "Em", "C", "D"]),
        song("Shape of You", "Ed Sheeran", &["Am", "Dm", "F", "G"]),
        song("Let Her Go", "Passenger", &["G", "D", "Em", "C"]),
        song("Happier", "Marshmello", &["Am", "F", "C", "G"]),
        song("Shallow", "Lady Gaga", &["Em", "D", "G", "C"]),
        song("Pumped Up Kicks", "Foster the People", &["Em", "G", "D", "A"]),
        song("Little Talks", "Of Monsters and Men", &["Am", "F", "C", "G"]),
        song("Take Me to Church", "Hozier", &["Em", "Am", "G", "C"]),
        song("The A Team", "Ed Sheeran", &["G", "D", "Em", "C"]),
        song("Budapest", "George Ezra", &["G", "D", "C"]),
        song("Shotgun", "George Ezra", &["G", "D", "Em", "C"]),
        song("Mr. Brightside", "The Killers", &["D", "G", "Bm", "A"]),
        song("Somewhere Only We Know", "Keane", &["A", "E", "D"]),
        song("High and Dry", "Radiohead", &["E", "A", "F#m"]),
        song("Champagne Supernova", "Oasis", &["A", "E", "D"]),
        song("House of the Rising Sun", "The Animals", &["Am", "C", "D", "F", "E"]),
        song("Stand By Me", "Ben E. King", &["A", "F#m", "D", "E"]),
        song("Lean on Me", "Bill Withers", &["C", "F", "G"]),
        song("Ain't No Sunshine", "Bill Withers", &["Am", "Em", "Dm"]),
        song("What's Going On", "Marvin Gaye", &["E", "C", "G", "D"]),
        song("Wonderful Tonight", "Eric Clapton", &["G", "D", "C"]),
        song("Tears in Heaven", "Eric Clapton", &["A", "E", "F#m", "D"]),
        song("Layla (Unplugged)", "Eric Clapton", &["Am", "C", "G", "D"]),
        song("Hotel California", "Eagles", &["Am", "E", "G", "D", "F", "C", "Dm"]),
        song("Take It Easy", "Eagles", &["G", "D", "C", "Em"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_keys_unique() {
        let progressions = all_progressions();
        let mut keys: Vec<_> = progressions.iter().map(|p| p.key).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn song_titles_unique() {
        let songs = all_songs();
        let mut titles: Vec<_> = songs.iter().map(|s| s.title).collect();
        let total = titles.len();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), total);
    }

    #[test]
    fn blues_is_twelve_bars() {
        let progressions = all_progressions();
        let blues = progressions.iter().find(|p| p.key == "blues").unwrap();
        assert_eq!(blues.chords.len(), 12);
    }
}
