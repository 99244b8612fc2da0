//! Built-in content: the Marrakech medina hunt and the reservations shown on
//! the management screen before any booking comes in.

use chrono::{NaiveDate, NaiveTime};

use crate::models::reservation::{
    ActivityType, Reservation, ReservationStatus, Team, TeamMember,
};
use crate::models::{AnswerRule, Coordinates, Difficulty, Enigma, Hunt, MediaHints, MiniGame, Step};

pub const MEDINA_HUNT_ID: &str = "marrakech-medina-adventure";

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn lines(list: &[&str]) -> Vec<String> {
    words(list)
}

fn groups(list: &[&[&str]]) -> Vec<Vec<String>> {
    list.iter().map(|g| words(g)).collect()
}

pub fn builtin_hunts() -> Vec<Hunt> {
    vec![Hunt {
        id: MEDINA_HUNT_ID.to_string(),
        title: "Aventure dans la Médina de Marrakech".to_string(),
        description: "Embarquez pour une aventure authentique à travers la médina de Marrakech. \
                      Découvrez les artisans, goûtez aux spécialités locales et plongez dans la \
                      culture marocaine traditionnelle."
            .to_string(),
        difficulty: Difficulty::Medium,
        duration: "4-5 heures".to_string(),
        steps: vec![
            Step {
                id: 1,
                location: "Magasin de Design".to_string(),
                puzzle: "Dans ce lieu d'art, chaque tableau cache un métier. Cherche le symbole \
                         que je t'ai donné. Quand tu le trouveras, tu découvriras quel est le \
                         métier qu'il représente."
                    .to_string(),
                enigma: Enigma {
                    question: "Quel métier représente le symbole que vous avez trouvé dans le tableau ?"
                        .to_string(),
                    hints: lines(&[
                        "Regardez attentivement tous les tableaux du magasin",
                        "Cherchez le symbole identique à celui affiché dans l'application",
                        "Chaque symbole correspond à un métier traditionnel marocain",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::AnyKeyword {
                        keywords: words(&[
                            "forgeron",
                            "boulanger",
                            "menuisier",
                            "potier",
                            "tisserand",
                            "maroquinier",
                            "bijoutier",
                        ]),
                    },
                    time_limit_minutes: 20,
                    points: 100,
                },
                required_item: "Sac à dos récupéré".to_string(),
                coordinates: Coordinates {
                    lat: 31.6295,
                    lng: -7.9811,
                },
            },
            Step {
                id: 2,
                location: "Magasin de Mohammed (près de Dars Dbagh)".to_string(),
                puzzle: "Dans ton sac à dos, tu trouveras un objet ancien… mais il est incomplet. \
                         Dans ce sachet n°2, il manque une pièce de ton objet. Rends-toi au \
                         magasin de Mohammed, près de Dars Dbagh avant Talaâ. Montre-lui le \
                         sachet : il te laissera récupérer la pièce manquante."
                    .to_string(),
                enigma: Enigma {
                    question: "Une fois toutes les pièces réunies, quel est le nom de l'artisan \
                               qui fabrique cet applicateur de khôl ?"
                        .to_string(),
                    hints: lines(&[
                        "Assemblez d'abord toutes les pièces de l'objet",
                        "Prenez une photo de l'objet complet",
                        "Cet artisan travaille traditionnellement le bois au tour",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::Conjunctive {
                        groups: groups(&[&["kharrat", "tourneur"]]),
                    },
                    time_limit_minutes: 25,
                    points: 150,
                },
                required_item: "Sachet n°2 avec objet incomplet".to_string(),
                coordinates: Coordinates {
                    lat: 31.6285,
                    lng: -7.9825,
                },
            },
            Step {
                id: 3,
                location: "Café Zaytoune".to_string(),
                puzzle: "Devant le Café Zaytoune, tu rencontreras une femme appelée Aïcha. Elle \
                         te remettra un petit sac. Dans ce sac, tu devras graver ton nom ou juste \
                         la première lettre de ton prénom. Ce sac t'accompagnera pour la suite de \
                         l'aventure."
                    .to_string(),
                enigma: Enigma {
                    question: "Avez-vous terminé la personnalisation de votre sac avec Aïcha ?"
                        .to_string(),
                    hints: lines(&[
                        "Trouvez Aïcha devant le Café Zaytoune",
                        "Gravez votre nom ou la première lettre de votre prénom",
                        "Prenez une photo de votre réalisation",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::Conjunctive {
                        groups: groups(&[&["oui", "terminé", "fini", "fait"]]),
                    },
                    time_limit_minutes: 30,
                    points: 120,
                },
                required_item: "Petit sac à personnaliser".to_string(),
                coordinates: Coordinates {
                    lat: 31.6275,
                    lng: -7.9835,
                },
            },
            Step {
                id: 4,
                location: "Pâtisserie BELKBIR".to_string(),
                puzzle: "Rendez-vous à la pâtisserie la plus célèbre de Marrakech, Pâtisserie \
                         BELKBIR, connue pour ses délicieux gâteaux marocains. Goûtez le gâteau \
                         pour l'apprécier pleinement."
                    .to_string(),
                enigma: Enigma {
                    question: "Quand les Marocains consomment-ils la chebakia et quels sont ses \
                               ingrédients principaux ?"
                        .to_string(),
                    hints: lines(&[
                        "Goûtez d'abord le gâteau traditionnel",
                        "Pensez aux périodes religieuses importantes",
                        "Les ingrédients incluent miel, sésame et fleur d'oranger",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::MinimumKeywords {
                        keywords: words(&["ramadan", "miel", "sésame", "fleur d'oranger"]),
                        min_matches: 2,
                    },
                    time_limit_minutes: 25,
                    points: 130,
                },
                required_item: "Dégustation de chebakia".to_string(),
                coordinates: Coordinates {
                    lat: 31.6265,
                    lng: -7.9845,
                },
            },
            Step {
                id: 5,
                location: "Magasin Savoir et Tradition".to_string(),
                puzzle: "À côté des Jardins Secrets, tu trouveras un magasin appelé Savoir et \
                         Tradition. Ta mission : découvrir un ingrédient spécial : le kaakella et \
                         nous envoyer une photo de celui-ci."
                    .to_string(),
                enigma: Enigma {
                    question: "Où et comment les Marocains utilisent-ils le kaakella ?".to_string(),
                    hints: lines(&[
                        "Cherchez cet ingrédient dans le magasin Savoir et Tradition",
                        "Prenez une photo du kaakella",
                        "Cet ingrédient est utilisé dans la cuisine traditionnelle",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::Conjunctive {
                        groups: groups(&[
                            &["kaakella", "cardamome"],
                            &["cuisine", "tajine", "épice"],
                        ]),
                    },
                    time_limit_minutes: 20,
                    points: 140,
                },
                required_item: "Photo du kaakella".to_string(),
                coordinates: Coordinates {
                    lat: 31.6255,
                    lng: -7.9855,
                },
            },
            Step {
                id: 6,
                location: "Jemaa el-Fna (Stand n°40)".to_string(),
                puzzle: "Rendez-vous chez les préparateurs de jus à Jemaa el-Fna, stand n°40. Ils \
                         te remettront un jus mixte spécial. Ta mission : goûter le jus et \
                         identifier correctement sa composition."
                    .to_string(),
                enigma: Enigma {
                    question: "Quels fruits composent ce jus spécial ?".to_string(),
                    hints: lines(&[
                        "Goûtez attentivement le jus",
                        "Il y a trois fruits principaux",
                        "L'un des fruits est typiquement marocain",
                    ]),
                    media_hints: None,
                    mini_game: None,
                    qr_code: None,
                    answer: AnswerRule::Conjunctive {
                        groups: groups(&[&["chehdia"], &["orange"], &["fraise"]]),
                    },
                    time_limit_minutes: 15,
                    points: 110,
                },
                required_item: "Dégustation du jus".to_string(),
                coordinates: Coordinates {
                    lat: 31.6258,
                    lng: -7.9890,
                },
            },
            Step {
                id: 7,
                location: "Médina (Gerrab)".to_string(),
                puzzle: "Trouve n'importe quel gerrab dans la médina. Ta mission : Prends une \
                         photo avec lui et donne-lui 5 DH que tu as trouvés dans ton sac."
                    .to_string(),
                enigma: Enigma {
                    question: "Que vend le gerrab ?".to_string(),
                    hints: lines(&[
                        "Cherchez un homme avec des gobelets métalliques",
                        "Il porte souvent un costume traditionnel",
                        "Son métier est lié à la soif des passants",
                    ]),
                    media_hints: Some(MediaHints {
                        audio: Some("Écoutez le cri traditionnel du gerrab".to_string()),
                        video: Some("Découvrez l'histoire du métier de gerrab".to_string()),
                        ar: Some("Explorez les outils du gerrab en 3D".to_string()),
                    }),
                    mini_game: Some(MiniGame {
                        question: "Le gerrab porte traditionnellement :".to_string(),
                        options: words(&[
                            "Des gobelets en métal",
                            "Un panier",
                            "Des bijoux",
                            "Un livre",
                        ]),
                        correct_option: 0,
                    }),
                    qr_code: Some("GERRAB_WATER".to_string()),
                    answer: AnswerRule::Conjunctive {
                        groups: groups(&[&["eau"], &["fraîche", "froide"]]),
                    },
                    time_limit_minutes: 25,
                    points: 160,
                },
                required_item: "5 DH du sac".to_string(),
                coordinates: Coordinates {
                    lat: 31.6280,
                    lng: -7.9870,
                },
            },
        ],
    }]
}

fn member(name: &str, email: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn slot(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn mock_reservations() -> Vec<Reservation> {
    vec![
        Reservation {
            id: "MAR1703847234".to_string(),
            customer_name: "Ahmed Benali".to_string(),
            email: "ahmed.benali@email.com".to_string(),
            phone: "+212 6XX XXX XXX".to_string(),
            date: day(2024, 3, 25),
            start_time: slot(9, 0),
            duration_hours: 5,
            party_size: 6,
            activity_type: ActivityType::Group,
            status: ReservationStatus::Confirmed,
            total_price: 1680,
            teams: vec![
                Team {
                    id: 1,
                    name: "Équipe 1".to_string(),
                    members: vec![
                        member("Ahmed Benali", "ahmed@email.com"),
                        member("Sara Alami", "sara@email.com"),
                        member("Youssef Tazi", "youssef@email.com"),
                    ],
                    route_id: "route-1".to_string(),
                },
                Team {
                    id: 2,
                    name: "Équipe 2".to_string(),
                    members: vec![
                        member("Fatima Idrissi", "fatima@email.com"),
                        member("Omar Benjelloun", "omar@email.com"),
                        member("Aicha Mansouri", "aicha@email.com"),
                    ],
                    route_id: "route-2".to_string(),
                },
            ],
            special_requests: None,
        },
        Reservation {
            id: "MAR1703847235".to_string(),
            customer_name: "Marie Dubois".to_string(),
            email: "marie.dubois@email.com".to_string(),
            phone: "+33 6XX XXX XXX".to_string(),
            date: day(2024, 3, 26),
            start_time: slot(14, 30),
            duration_hours: 5,
            party_size: 1,
            activity_type: ActivityType::Individual,
            status: ReservationStatus::Pending,
            total_price: 450,
            teams: Vec::new(),
            special_requests: None,
        },
        Reservation {
            id: "MAR1703847236".to_string(),
            customer_name: "Hassan Alaoui".to_string(),
            email: "hassan.alaoui@email.com".to_string(),
            phone: "+212 6XX XXX XXX".to_string(),
            date: day(2024, 3, 27),
            start_time: slot(10, 0),
            duration_hours: 5,
            party_size: 4,
            activity_type: ActivityType::Group,
            status: ReservationStatus::Confirmed,
            total_price: 1120,
            teams: Vec::new(),
            special_requests: None,
        },
    ]
}
