// Wager database.

diesel::table! {
    teams (id) {
        id -> Integer,
        team_id -> Text,
        name -> Text,
    }
}

diesel::table! {
    events (id) {
        id -> Integer,
        event_id -> Text,
        home_team_id -> Integer,
        away_team_id -> Integer,
        league_name -> Text,
        match_date -> Nullable<Text>,
        status -> Text,
    }
}

diesel::table! {
    bets (id) {
        id -> Integer,
        event_id -> Text,
        market_type -> Text,
        selection -> Text,
        odds -> Double,
        line -> Text,
        map_number -> Nullable<Integer>,
        stake -> Nullable<Double>,
        bet_status -> Text,
        actual_value -> Nullable<Double>,
        actual_win -> Nullable<Double>,
        result_verified -> Bool,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(teams, events, bets);

// History database.

diesel::table! {
    matches (id) {
        id -> Integer,
        bet365_id -> Text,
        home_team_id -> Text,
        away_team_id -> Text,
        event_time -> Nullable<Text>,
        time_status -> Nullable<Integer>,
        final_score -> Nullable<Text>,
    }
}

diesel::table! {
    game_maps (id) {
        id -> Integer,
        match_id -> Integer,
        map_number -> Integer,
    }
}

diesel::table! {
    map_statistics (id) {
        id -> Integer,
        map_id -> Integer,
        stat_name -> Text,
        home_value -> Nullable<Text>,
        away_value -> Nullable<Text>,
    }
}

diesel::joinable!(game_maps -> matches (match_id));
diesel::joinable!(map_statistics -> game_maps (map_id));

diesel::allow_tables_to_appear_in_same_query!(matches, game_maps, map_statistics);
