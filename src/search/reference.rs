//! Embedded reference catalog used to pick query tracks and to synthesize
//! offline results.

use super::models::Track;

struct ReferenceEntry {
    id: &'static str,
    artist: &'static str,
    track: &'static str,
    album: &'static str,
    youtube_url: &'static str,
}

const REFERENCE_ENTRIES: &[ReferenceEntry] = &[
    ReferenceEntry {
        id: "ref-001",
        artist: "Coldplay",
        track: "Yellow",
        album: "Parachutes",
        youtube_url: "https://www.youtube.com/watch?v=yKNxeF4KMsY",
    },
    ReferenceEntry {
        id: "ref-002",
        artist: "Coldplay",
        track: "Viva La Vida",
        album: "Viva la Vida or Death and All His Friends",
        youtube_url: "https://www.youtube.com/watch?v=dvgZkm1xWPE",
    },
    ReferenceEntry {
        id: "ref-003",
        artist: "Coldplay",
        track: "Fix You",
        album: "X&Y",
        youtube_url: "https://www.youtube.com/watch?v=k4V3Mo61fJM",
    },
    ReferenceEntry {
        id: "ref-004",
        artist: "Queen",
        track: "Bohemian Rhapsody",
        album: "A Night at the Opera",
        youtube_url: "https://www.youtube.com/watch?v=fJ9rUzIMcZQ",
    },
    ReferenceEntry {
        id: "ref-005",
        artist: "Adele",
        track: "Rolling in the Deep",
        album: "21",
        youtube_url: "https://www.youtube.com/watch?v=rYEDA3JcQqw",
    },
    ReferenceEntry {
        id: "ref-006",
        artist: "Radiohead",
        track: "Creep",
        album: "Pablo Honey",
        youtube_url: "https://www.youtube.com/watch?v=XFkzRNyygfk",
    },
    ReferenceEntry {
        id: "ref-007",
        artist: "Nirvana",
        track: "Smells Like Teen Spirit",
        album: "Nevermind",
        youtube_url: "https://www.youtube.com/watch?v=hTWKbfoikeg",
    },
    ReferenceEntry {
        id: "ref-008",
        artist: "Michael Jackson",
        track: "Billie Jean",
        album: "Thriller",
        youtube_url: "https://www.youtube.com/watch?v=Zi_XLOBDo_Y",
    },
    ReferenceEntry {
        id: "ref-009",
        artist: "Daft Punk",
        track: "Get Lucky",
        album: "Random Access Memories",
        youtube_url: "https://www.youtube.com/watch?v=5NV6Rdv1a3I",
    },
    ReferenceEntry {
        id: "ref-010",
        artist: "Eminem",
        track: "Lose Yourself",
        album: "8 Mile",
        youtube_url: "https://www.youtube.com/watch?v=_Yhyp-_hX2s",
    },
    ReferenceEntry {
        id: "ref-011",
        artist: "Ed Sheeran",
        track: "Shape of You",
        album: "Divide",
        youtube_url: "https://www.youtube.com/watch?v=JGwWNGJdvx8",
    },
    ReferenceEntry {
        id: "ref-012",
        artist: "Billie Eilish",
        track: "bad guy",
        album: "When We All Fall Asleep, Where Do We Go?",
        youtube_url: "https://www.youtube.com/watch?v=DyDfgMOUjCI",
    },
    ReferenceEntry {
        id: "ref-013",
        artist: "The Weeknd",
        track: "Blinding Lights",
        album: "After Hours",
        youtube_url: "https://www.youtube.com/watch?v=4NRXx6U8ABQ",
    },
    ReferenceEntry {
        id: "ref-014",
        artist: "Imagine Dragons",
        track: "Radioactive",
        album: "Night Visions",
        youtube_url: "https://www.youtube.com/watch?v=ktvTqknDobU",
    },
    ReferenceEntry {
        id: "ref-015",
        artist: "Linkin Park",
        track: "Numb",
        album: "Meteora",
        youtube_url: "https://www.youtube.com/watch?v=kXYiU_JCYtU",
    },
    ReferenceEntry {
        id: "ref-016",
        artist: "Oasis",
        track: "Wonderwall",
        album: "(What's the Story) Morning Glory?",
        youtube_url: "https://www.youtube.com/watch?v=bx1Bh8ZvH84",
    },
    ReferenceEntry {
        id: "ref-017",
        artist: "Arctic Monkeys",
        track: "Do I Wanna Know?",
        album: "AM",
        youtube_url: "https://www.youtube.com/watch?v=bpOSxM0rNPM",
    },
    ReferenceEntry {
        id: "ref-018",
        artist: "Taylor Swift",
        track: "Shake It Off",
        album: "1989",
        youtube_url: "https://www.youtube.com/watch?v=nfWlot6h_JM",
    },
    ReferenceEntry {
        id: "ref-019",
        artist: "Gorillaz",
        track: "Feel Good Inc.",
        album: "Demon Days",
        youtube_url: "https://www.youtube.com/watch?v=HyHNuVaZJ-k",
    },
    ReferenceEntry {
        id: "ref-020",
        artist: "Rick Astley",
        track: "Never Gonna Give You Up",
        album: "Whenever You Need Somebody",
        youtube_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    },
];

impl ReferenceEntry {
    fn matches(&self, needle: &str) -> bool {
        self.track.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
    }

    fn to_track(&self) -> Track {
        Track {
            id: self.id.to_string(),
            artist: self.artist.to_string(),
            track: self.track.to_string(),
            album: self.album.to_string(),
            youtube_url: self.youtube_url.to_string(),
            similarity: None,
        }
    }
}

/// All reference tracks, without similarity scores.
pub fn tracks() -> Vec<Track> {
    REFERENCE_ENTRIES.iter().map(ReferenceEntry::to_track).collect()
}

/// First reference track whose title or artist contains the query,
/// case-insensitively. A blank query matches nothing.
pub fn find_match(query: &str) -> Option<Track> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    REFERENCE_ENTRIES
        .iter()
        .find(|entry| entry.matches(&needle))
        .map(ReferenceEntry::to_track)
}
