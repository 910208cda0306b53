//! Built-in marketplace [`Catalog`].

use std::sync::LazyLock;

use crate::domain::{
    filter::{self, Group},
    listing, sort, Filter, Label,
};

use super::Catalog;

/// Built-in marketplace [`Catalog`].
pub(super) static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    filters: vec![
        select_multiple(
            "top_categories",
            "Top Categories",
            Group::Primary,
            "pub_category",
            TOP_CATEGORIES,
        ),
        select_multiple(
            "brands",
            "Top Brands",
            Group::Secondary,
            "pub_brands",
            BRANDS,
        ),
        select_multiple(
            "fandom_series",
            "Top Fandoms",
            Group::Secondary,
            "pub_fandoms",
            FANDOMS,
        ),
        select_multiple(
            "anime_series",
            "Top Anime",
            Group::Secondary,
            "pub_anime",
            ANIME,
        ),
        select_multiple(
            "video_game_series",
            "Top Video Games",
            Group::Secondary,
            "pub_video_games",
            VIDEO_GAMES,
        ),
        select_multiple(
            "all_categories",
            "All Categories",
            Group::Secondary,
            "pub_category",
            ALL_CATEGORIES,
        ),
        Filter {
            id: id("price"),
            label: "Price".into(),
            group: Group::Primary,
            query_param_names: vec![param("price")],
            config: filter::Config::Price(filter::PriceConfig {
                min: 0,
                max: 999_999,
                step: 3,
            }),
        },
        Filter {
            id: id("keyword"),
            label: "Keyword".into(),
            group: Group::Primary,
            query_param_names: vec![param("keywords")],
            config: filter::Config::Keyword(filter::KeywordConfig {}),
        },
    ],
    sort_config: sort::Config {
        active: true,
        query_param_name: param(sort::QUERY_PARAM),
        relevance_key: sort_key("relevance"),
        relevance_filter: param("keywords"),
        conflicting_filters: vec![],
        options: vec![
            sort_choice("createdAt", "Newest", None),
            sort_choice("-createdAt", "Oldest", None),
            sort_choice("-price", "Lowest price", None),
            sort_choice("price", "Highest price", None),
            sort_choice(
                "relevance",
                "Relevance",
                Some("Relevance (Keyword search)"),
            ),
        ],
    },
    listing: listing::Config {
        enum_field_details: vec!["size".into(), "brand".into(), "category".into()],
    },
});

/// Featured categories.
const TOP_CATEGORIES: &[(&str, &str)] = &[
    ("figurines", "Figurines"),
    ("trading_cards", "Trading Cards"),
    ("comics_books_manga", "Comics/Books/Manga"),
    ("video_games", "Video Games"),
    ("apparel", "Apparel"),
];

/// Featured brands.
const BRANDS: &[(&str, &str)] = &[
    ("funko_pop", "Funko Pop!"),
    ("hot_toys", "Hot Toys"),
    ("neca", "NECA"),
    ("bandai_namco", "Bandai Namco"),
    ("good_smile_company", "Good Smile Company"),
    ("kotobukiya", "Kotobukiya"),
    ("square_enix", "Square Enix"),
    ("max_factory", "Max Factory"),
    ("alter", "Alter"),
    ("megahouse", "Megahouse"),
    ("banpresto", "Banpresto"),
    ("diamond_select_toys", "Diamond Select Toys"),
    ("revoltech", "Revoltech"),
    ("figma", "Figma"),
    ("medicom_toy", "Medicom Toy"),
    ("gundam", "Gundam Gunpla"),
];

/// Featured fandoms.
const FANDOMS: &[(&str, &str)] = &[
    ("harry_potter", "Harry Potter"),
    ("star_wars", "Star Wars"),
    ("marvel_comics", "Marvel Comics"),
    ("dc_comics", "DC Comics"),
    ("game_of_thrones", "Game of Thrones"),
    ("doctor_who", "Doctor Who"),
    ("lord_of_the_rings", "Lord of the Rings"),
    ("the_walking_dead", "The Walking Dead"),
    ("stranger_things", "Stranger Things"),
    ("sherlock", "Sherlock"),
    ("pokemon", "Pokemon"),
    ("star_trek", "Star Trek"),
    ("the_avengers", "The Avengers"),
    ("the_hobbit", "The Hobbit"),
    ("doctor_strange", "Doctor Strange"),
    ("x-men", "X-Men"),
    ("avatar_the_last_airbender", "Avatar: The Last Airbender"),
    ("deadpool", "Deadpool"),
    ("spider-man", "Spider-Man"),
    ("batman", "Batman"),
    ("superman", "Superman"),
    ("iron_man", "Iron Man"),
    ("captain_america", "Captain America"),
    ("thor", "Thor"),
    ("wonder_woman", "Wonder Woman"),
    ("black_panther", "Black Panther"),
    ("the_flash", "The Flash"),
    ("green_lantern", "Green Lantern"),
    ("spider-man_no_way_home", "Spider-Man: No Way Home"),
    ("disney", "Disney"),
];

/// Featured anime.
const ANIME: &[(&str, &str)] = &[
    ("attack_on_titan", "Attack on Titan"),
    ("demon_slayer", "Demon Slayer"),
    ("one_piece", "One Piece"),
    ("naruto", "Naruto"),
    ("my_hero_academia", "My Hero Academia"),
    ("death_note", "Death Note"),
    (
        "fullmetal_alchemist_brotherhood",
        "Fullmetal Alchemist: Brotherhood",
    ),
    ("hunter_x_hunter", "Hunter x Hunter"),
    ("sword_art_online", "Sword Art Online"),
    ("cowboy_bebop", "Cowboy Bebop"),
    ("bleach", "Bleach"),
    ("dragon_ball_z", "Dragon Ball Z"),
    ("neon_genesis_evangelion", "Neon Genesis Evangelion"),
    ("fairy_tail", "Fairy Tail"),
    ("one_punch_man", "One Punch Man"),
    ("jojos_bizarre_adventure", "JoJo's Bizarre Adventure"),
    ("code_geass", "Code Geass"),
    ("steins_gate", "Steins;Gate"),
    ("gintama", "Gintama"),
    ("black_clover", "Black Clover"),
    ("my_neighbor_totoro", "My Neighbor Totoro"),
    ("violet_evergarden", "Violet Evergarden"),
    ("kimi_no_na_wa", "Your Name"),
    ("no_game_no_life", "No Game No Life"),
    ("toradora", "Toradora!"),
    ("your_lie_in_april", "Your Lie in April"),
    ("mob_psycho_100", "Mob Psycho 100"),
    ("konosuba", "KonoSuba"),
    ("re_zero", "Re:Zero"),
    ("clannad", "Clannad"),
    ("angel_beats", "Angel Beats!"),
    ("monster", "Monster"),
    ("grave_of_the_fireflies", "Grave of the Fireflies"),
    ("akira", "Akira"),
    ("princess_mononoke", "Princess Mononoke"),
    ("spirited_away", "Spirited Away"),
    ("death_parade", "Death Parade"),
    ("perfect_blue", "Perfect Blue"),
    ("paprika", "Paprika"),
    ("tokyo_ghoul", "Tokyo Ghoul"),
    ("parasyte", "Parasyte"),
];

/// Featured video game series.
const VIDEO_GAMES: &[(&str, &str)] = &[
    ("the_legend_of_zelda", "The Legend of Zelda"),
    ("super_mario_bros", "Super Mario Bros."),
    ("grand_theft_auto", "Grand Theft Auto"),
    ("tetris", "Tetris"),
    ("the_last_of_us", "The Last of Us"),
    ("minecraft", "Minecraft"),
    ("metal_gear_solid", "Metal Gear Solid"),
    ("red_dead_redemption", "Red Dead Redemption"),
    ("final_fantasy", "Final Fantasy"),
    ("half_life", "Half-Life"),
    ("resident_evil", "Resident Evil"),
    ("portal", "Portal"),
    ("world_of_warcraft", "World of Warcraft"),
    ("the_witcher", "The Witcher"),
    ("god_of_war", "God of War"),
    ("street_fighter", "Street Fighter"),
    ("super_mario", "Super Mario"),
    ("mass_effect", "Mass Effect"),
    ("chrono_trigger", "Chrono Trigger"),
    ("diablo", "Diablo"),
    ("bioshock", "BioShock"),
    ("dark_souls", "Dark Souls"),
    ("counter_strike", "Counter-Strike"),
    ("super_smash_bros", "Super Smash Bros."),
    ("persona", "Persona"),
    ("uncharted", "Uncharted"),
    ("the_elder_scrolls", "The Elder Scrolls"),
    ("fallout", "Fallout"),
    ("super_metroid", "Super Metroid"),
    ("halo", "Halo"),
    ("shadow_of_the_colossus", "Shadow of the Colossus"),
    ("dota_2", "Dota 2"),
];

/// Every category a listing may belong to.
const ALL_CATEGORIES: &[(&str, &str)] = &[
    ("figurines", "Figurines"),
    ("statues", "Statues"),
    ("action_figures", "Action Figures"),
    ("plush_toys", "Plush Toys"),
    ("prop_replicas", "Prop Replicas"),
    ("trading_cards", "Trading Cards"),
    ("comics_books_manga", "Comics/Books/Manga"),
    ("art_prints", "Art Prints"),
    ("posters", "Posters"),
    ("video_games", "Video Games"),
    ("board_games", "Board Games"),
    ("puzzles", "Puzzles"),
    ("apparel", "Apparel"),
    ("t-shirts", "T-Shirts"),
    ("hoodies_sweatshirts", "Hoodies/Sweatshirts"),
    ("jackets", "Jackets"),
    ("hats", "Hats"),
    ("socks", "Socks"),
    ("accessories", "Accessories"),
    ("wallets", "Wallets"),
    ("backpacks", "Backpacks"),
    ("pins_badges", "Pins/Badges"),
    ("keychains", "Keychains"),
    ("lanyards", "Lanyards"),
    ("phone_cases", "Phone Cases"),
    ("mugs", "Mugs"),
    ("drinkware", "Drinkware"),
    ("home_decor", "Home Decor"),
    ("figures_and_statues", "Figures and Statues"),
    ("bedding", "Bedding"),
    ("bath_towels", "Bath Towels"),
    ("throw_blankets", "Throw Blankets"),
    ("ornaments", "Ornaments"),
];

/// Creates a [`filter::Kind::SelectMultiple`] [`Filter`] over a single
/// `enum` attribute.
fn select_multiple(
    filter_id: &str,
    label: &str,
    group: Group,
    query_param: &str,
    options: &[(&str, &str)],
) -> Filter {
    Filter {
        id: id(filter_id),
        label: label.into(),
        group,
        query_param_names: vec![param(query_param)],
        config: filter::Config::SelectMultiple(filter::SelectConfig {
            schema_type: filter::SchemaType::Enum,
            search_mode: None,
            options: options
                .iter()
                .map(|&(key, label)| filter::SelectOption {
                    key: filter::OptionKey::new(key).unwrap_or_else(|| {
                        panic!("invalid built-in option key: `{key}`")
                    }),
                    label: label.into(),
                })
                .collect(),
        }),
    }
}

/// Creates a [`sort::Choice`].
fn sort_choice(key: &str, label: &str, long_label: Option<&str>) -> sort::Choice {
    sort::Choice {
        key: sort_key(key),
        label: label.into(),
        long_label: long_label.map(Label::from),
    }
}

/// Creates a [`filter::Id`] out of a built-in literal.
fn id(id: &str) -> filter::Id {
    filter::Id::new(id)
        .unwrap_or_else(|| panic!("invalid built-in filter ID: `{id}`"))
}

/// Creates a [`filter::QueryParamName`] out of a built-in literal.
fn param(name: &str) -> filter::QueryParamName {
    filter::QueryParamName::new(name)
        .unwrap_or_else(|| panic!("invalid built-in query parameter: `{name}`"))
}

/// Creates a [`sort::Key`] out of a built-in literal.
fn sort_key(key: &str) -> sort::Key {
    sort::Key::new(key)
        .unwrap_or_else(|| panic!("invalid built-in sort key: `{key}`"))
}
